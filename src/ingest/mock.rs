use super::IngestService;
use crate::models::MediaAsset;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockIngestor {
    asset_responses: Arc<Mutex<Vec<MediaAsset>>>,
    call_count: Arc<Mutex<usize>>,
    next_id: Arc<Mutex<u64>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockIngestor {
    pub fn new() -> Self {
        Self {
            asset_responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            next_id: Arc::new(Mutex::new(1)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_asset_response(self, asset: MediaAsset) -> Self {
        self.asset_responses.lock().unwrap().push(asset);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Fabricate an asset the way a real ingest would describe it.
    pub fn asset(id: u64, url: &str, title: &str) -> MediaAsset {
        MediaAsset {
            id,
            url: url.to_string(),
            file: PathBuf::from(format!("/uploads/{}.png", id)),
            mime_type: "image/png".to_string(),
            title: format!("{} - AI Generated Image", title),
            metadata: None,
            created_at: Utc::now(),
        }
    }
}

impl Default for MockIngestor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IngestService for MockIngestor {
    async fn ingest(&self, _image_url: &str, title: &str) -> Result<MediaAsset> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(Error::DownloadFailed("Mock ingest failure".to_string()));
        }

        let responses = self.asset_responses.lock().unwrap();
        if responses.is_empty() {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            Ok(Self::asset(
                id,
                &format!("http://mock-cdn.example.com/{}.png", id),
                title,
            ))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_asset() {
        let ingestor = MockIngestor::new()
            .with_asset_response(MockIngestor::asset(42, "http://cdn/x.png", "a red bicycle"));

        let asset = ingestor
            .ingest("http://img/x.png", "a red bicycle")
            .await
            .unwrap();

        assert_eq!(asset.id, 42);
        assert_eq!(asset.url, "http://cdn/x.png");
        assert_eq!(ingestor.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_default_assets_have_distinct_ids() {
        let ingestor = MockIngestor::new();

        let first = ingestor.ingest("http://img/x.png", "t").await.unwrap();
        let second = ingestor.ingest("http://img/x.png", "t").await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let ingestor = MockIngestor::new().with_failure(true);

        let err = ingestor.ingest("http://img/x.png", "t").await.unwrap_err();
        assert!(matches!(err, Error::DownloadFailed(_)));
        assert_eq!(ingestor.get_call_count(), 1);
    }
}
