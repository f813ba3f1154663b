use super::{sanitize_file_name, IngestService};
use crate::media::MediaLibrary;
use crate::models::MediaAsset;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

pub struct Ingestor {
    client: Client,
    library: Arc<dyn MediaLibrary>,
}

impl Ingestor {
    pub fn new(library: Arc<dyn MediaLibrary>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, library }
    }

    pub fn new_with_client(library: Arc<dyn MediaLibrary>, client: Client) -> Self {
        Self { client, library }
    }

    /// Download a URL into a named temp file. The file is deleted when the
    /// returned handle drops, which covers every exit path of `ingest`.
    async fn download_to_temp(&self, image_url: &str) -> Result<NamedTempFile> {
        let response = self.client.get(image_url).send().await.map_err(|e| {
            tracing::error!("Failed to download generated image: {}", e);
            Error::DownloadFailed(format!("Transport error: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Image download returned status {}", status);
            return Err(Error::DownloadFailed(format!(
                "Download returned status {}",
                status
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read downloaded image body: {}", e);
            Error::DownloadFailed(format!("Body read error: {}", e))
        })?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(&bytes)?;
        temp.flush()?;

        tracing::debug!("Downloaded {} bytes to {}", bytes.len(), temp.path().display());
        Ok(temp)
    }
}

#[async_trait]
impl IngestService for Ingestor {
    async fn ingest(&self, image_url: &str, title: &str) -> Result<MediaAsset> {
        let temp = self.download_to_temp(image_url).await?;

        let file_name = sanitize_file_name(&format!("{}-ai-generated.png", title));
        let stored = self.library.sideload(temp.path(), &file_name).await?;

        let display_title = format!("{} - AI Generated Image", title);
        let mut asset = self.library.insert_attachment(&stored, &display_title).await?;

        let metadata = self.library.generate_metadata(&asset).await?;
        self.library
            .update_metadata(asset.id, metadata.clone())
            .await?;
        asset.metadata = Some(metadata);

        tracing::info!("Ingested {} as attachment {}", image_url, asset.id);
        Ok(asset)
    }
}
