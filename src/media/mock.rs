use super::{MediaLibrary, StoredFile};
use crate::models::{AssetId, AssetMetadata, MediaAsset};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockMediaLibrary {
    assets: Arc<Mutex<Vec<MediaAsset>>>,
    next_id: Arc<Mutex<AssetId>>,
    base_url: String,
    sideload_count: Arc<Mutex<usize>>,
    fail_sideload: Arc<Mutex<bool>>,
    fail_insert: Arc<Mutex<bool>>,
}

impl MockMediaLibrary {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
            base_url: "http://mock-cdn.example.com".to_string(),
            sideload_count: Arc::new(Mutex::new(0)),
            fail_sideload: Arc::new(Mutex::new(false)),
            fail_insert: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_next_id(self, id: AssetId) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    pub fn with_sideload_failure(self, should_fail: bool) -> Self {
        *self.fail_sideload.lock().unwrap() = should_fail;
        self
    }

    pub fn with_insert_failure(self, should_fail: bool) -> Self {
        *self.fail_insert.lock().unwrap() = should_fail;
        self
    }

    pub fn get_sideload_count(&self) -> usize {
        *self.sideload_count.lock().unwrap()
    }

    pub fn get_assets(&self) -> Vec<MediaAsset> {
        self.assets.lock().unwrap().clone()
    }
}

impl Default for MockMediaLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaLibrary for MockMediaLibrary {
    async fn sideload(&self, temp_path: &Path, file_name: &str) -> Result<StoredFile> {
        let mut count = self.sideload_count.lock().unwrap();
        *count += 1;

        if *self.fail_sideload.lock().unwrap() {
            return Err(Error::StorageFailed("Mock sideload failure".to_string()));
        }

        let size = std::fs::metadata(temp_path).map(|m| m.len()).unwrap_or(0);

        Ok(StoredFile {
            path: temp_path.with_file_name(file_name),
            url: format!("{}/{}", self.base_url, file_name),
            mime_type: "image/png".to_string(),
            size,
        })
    }

    async fn insert_attachment(&self, stored: &StoredFile, title: &str) -> Result<MediaAsset> {
        if *self.fail_insert.lock().unwrap() {
            return Err(Error::StorageFailed("Mock insert failure".to_string()));
        }

        let mut next_id = self.next_id.lock().unwrap();
        let asset = MediaAsset {
            id: *next_id,
            url: stored.url.clone(),
            file: stored.path.clone(),
            mime_type: stored.mime_type.clone(),
            title: title.to_string(),
            metadata: None,
            created_at: Utc::now(),
        };
        *next_id += 1;

        self.assets.lock().unwrap().push(asset.clone());
        Ok(asset)
    }

    async fn generate_metadata(&self, _asset: &MediaAsset) -> Result<AssetMetadata> {
        Ok(AssetMetadata {
            width: 1024,
            height: 1024,
            sizes: Vec::new(),
        })
    }

    async fn update_metadata(&self, asset_id: AssetId, metadata: AssetMetadata) -> Result<()> {
        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .iter_mut()
            .find(|asset| asset.id == asset_id)
            .ok_or_else(|| Error::StorageFailed(format!("No attachment with id {}", asset_id)))?;
        asset.metadata = Some(metadata);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn stored_file() -> StoredFile {
        StoredFile {
            path: PathBuf::from("/uploads/test.png"),
            url: "http://mock-cdn.example.com/test.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 4,
        }
    }

    #[tokio::test]
    async fn test_mock_assigns_sequential_ids() {
        let library = MockMediaLibrary::new().with_next_id(42);
        let stored = stored_file();

        let first = library.insert_attachment(&stored, "A").await.unwrap();
        let second = library.insert_attachment(&stored, "B").await.unwrap();

        assert_eq!(first.id, 42);
        assert_eq!(second.id, 43);
        assert_eq!(library.get_assets().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_sideload_counts_and_fails_on_demand() {
        let library = MockMediaLibrary::new().with_sideload_failure(true);

        let err = library
            .sideload(Path::new("/tmp/x"), "x.png")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StorageFailed(_)));
        assert_eq!(library.get_sideload_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_sideload_uses_configured_base_url() {
        let library =
            MockMediaLibrary::new().with_base_url("http://custom-cdn.test".to_string());

        let stored = library
            .sideload(Path::new("/tmp/x"), "x.png")
            .await
            .unwrap();
        assert_eq!(stored.url, "http://custom-cdn.test/x.png");
    }

    #[tokio::test]
    async fn test_mock_update_metadata() {
        let library = MockMediaLibrary::new();
        let asset = library
            .insert_attachment(&stored_file(), "A")
            .await
            .unwrap();

        let metadata = library.generate_metadata(&asset).await.unwrap();
        library.update_metadata(asset.id, metadata).await.unwrap();

        assert!(library.get_assets()[0].metadata.is_some());
    }

    #[tokio::test]
    async fn test_mock_update_metadata_unknown_id() {
        let library = MockMediaLibrary::new();
        let metadata = AssetMetadata {
            width: 1,
            height: 1,
            sizes: Vec::new(),
        };

        assert!(library.update_metadata(999, metadata).await.is_err());
    }
}
