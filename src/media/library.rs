use super::{mime, MediaLibrary, StoredFile};
use crate::models::{AssetId, AssetMetadata, MediaAsset, SizeVariant};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const INDEX_FILE: &str = "library.json";

/// Thumbnail variants generated for every attachment, as (name, bounding
/// box) pairs. Variants larger than the source are skipped.
const THUMBNAIL_SIZES: &[(&str, u32)] = &[("thumbnail", 150), ("medium", 300)];

#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryIndex {
    next_id: AssetId,
    assets: Vec<MediaAsset>,
}

/// Media library backed by an uploads directory and a JSON index file.
/// Stored files are served under `base_url`.
pub struct FsMediaLibrary {
    uploads_dir: PathBuf,
    base_url: String,
    index_path: PathBuf,
    index: Mutex<LibraryIndex>,
}

impl FsMediaLibrary {
    pub fn open(uploads_dir: &Path, base_url: &str) -> Result<Self> {
        fs::create_dir_all(uploads_dir)?;
        let index_path = uploads_dir.join(INDEX_FILE);

        let index = if index_path.exists() {
            let json = fs::read_to_string(&index_path)?;
            serde_json::from_str(&json)?
        } else {
            LibraryIndex {
                next_id: 1,
                assets: Vec::new(),
            }
        };

        Ok(Self {
            uploads_dir: uploads_dir.to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
            index_path,
            index: Mutex::new(index),
        })
    }

    pub fn get_asset(&self, id: AssetId) -> Option<MediaAsset> {
        self.index
            .lock()
            .unwrap()
            .assets
            .iter()
            .find(|asset| asset.id == id)
            .cloned()
    }

    fn persist(&self, index: &LibraryIndex) -> Result<()> {
        let json = serde_json::to_string_pretty(index)?;
        fs::write(&self.index_path, json)?;
        Ok(())
    }

    /// Pick a target path that does not clash with an existing upload,
    /// appending a numeric suffix when needed (`file.png`, `file-1.png`, ...).
    fn unique_target(&self, file_name: &str) -> (PathBuf, String) {
        let candidate = self.uploads_dir.join(file_name);
        if !candidate.exists() {
            return (candidate, file_name.to_string());
        }

        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem.to_string(), format!(".{}", ext)),
            None => (file_name.to_string(), String::new()),
        };

        let mut counter = 1u32;
        loop {
            let name = format!("{}-{}{}", stem, counter, ext);
            let candidate = self.uploads_dir.join(&name);
            if !candidate.exists() {
                return (candidate, name);
            }
            counter += 1;
        }
    }

    fn generate_variants_sync(file: PathBuf) -> Result<AssetMetadata> {
        let img = image::open(&file)?;
        let (width, height) = (img.width(), img.height());

        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::StorageFailed(format!("Invalid file path: {}", file.display())))?
            .to_string();
        let ext = file
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png")
            .to_string();

        let mut sizes = Vec::new();
        for (name, bound) in THUMBNAIL_SIZES {
            if width <= *bound && height <= *bound {
                continue;
            }

            let variant = img.thumbnail(*bound, *bound);
            let variant_name = format!("{}-{}x{}.{}", stem, variant.width(), variant.height(), ext);
            let variant_path = file.with_file_name(&variant_name);
            variant.save(&variant_path)?;

            sizes.push(SizeVariant {
                name: name.to_string(),
                file: variant_name,
                width: variant.width(),
                height: variant.height(),
            });
        }

        Ok(AssetMetadata {
            width,
            height,
            sizes,
        })
    }
}

#[async_trait]
impl MediaLibrary for FsMediaLibrary {
    async fn sideload(&self, temp_path: &Path, file_name: &str) -> Result<StoredFile> {
        let head = fs::read(temp_path)?;
        let mime_type = mime::detect_image_mime(&head).ok_or_else(|| {
            Error::StorageFailed(format!(
                "Rejected sideload of {}: not a recognized image",
                file_name
            ))
        })?;
        let size = head.len() as u64;

        let (target, final_name) = self.unique_target(file_name);
        fs::copy(temp_path, &target)?;

        tracing::info!(
            "Sideloaded {} ({} bytes, {}) into uploads",
            final_name,
            size,
            mime_type
        );

        Ok(StoredFile {
            path: target,
            url: format!("{}/{}", self.base_url, final_name),
            mime_type: mime_type.to_string(),
            size,
        })
    }

    async fn insert_attachment(&self, stored: &StoredFile, title: &str) -> Result<MediaAsset> {
        let mut index = self.index.lock().unwrap();

        let asset = MediaAsset {
            id: index.next_id,
            url: stored.url.clone(),
            file: stored.path.clone(),
            mime_type: stored.mime_type.clone(),
            title: title.to_string(),
            metadata: None,
            created_at: Utc::now(),
        };

        index.next_id += 1;
        index.assets.push(asset.clone());
        self.persist(&index)?;

        tracing::info!("Inserted attachment {} ({})", asset.id, asset.title);
        Ok(asset)
    }

    async fn generate_metadata(&self, asset: &MediaAsset) -> Result<AssetMetadata> {
        let file = asset.file.clone();
        tokio::task::spawn_blocking(move || Self::generate_variants_sync(file))
            .await
            .map_err(|e| Error::StorageFailed(format!("Metadata task join error: {}", e)))?
    }

    async fn update_metadata(&self, asset_id: AssetId, metadata: AssetMetadata) -> Result<()> {
        let mut index = self.index.lock().unwrap();

        let asset = index
            .assets
            .iter_mut()
            .find(|asset| asset.id == asset_id)
            .ok_or_else(|| Error::StorageFailed(format!("No attachment with id {}", asset_id)))?;
        asset.metadata = Some(metadata);

        self.persist(&index)
    }
}
