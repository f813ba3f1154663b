//! Media library storage for ingested images
//!
//! Handles sideloading downloaded files into the uploads directory,
//! inserting library records, and generating derived metadata
//! (dimensions and thumbnail variants).

pub mod library;
pub mod mime;
pub mod mock;

pub use library::FsMediaLibrary;
pub use mock::MockMediaLibrary;

use crate::models::{AssetId, AssetMetadata, MediaAsset};
use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A file accepted into persistent storage by [`MediaLibrary::sideload`].
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub url: String,
    pub mime_type: String,
    pub size: u64,
}

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Validate an already-downloaded file and move it into persistent
    /// storage under a collision-free name.
    async fn sideload(&self, temp_path: &Path, file_name: &str) -> Result<StoredFile>;

    /// Insert a library record for a stored file. Every call creates a new
    /// record; there is no deduplication.
    async fn insert_attachment(&self, stored: &StoredFile, title: &str) -> Result<MediaAsset>;

    /// Compute derived metadata (dimensions, thumbnail variants) for an
    /// asset's stored file.
    async fn generate_metadata(&self, asset: &MediaAsset) -> Result<AssetMetadata>;

    /// Persist derived metadata against an existing record. The one
    /// permitted post-creation mutation of an asset.
    async fn update_metadata(&self, asset_id: AssetId, metadata: AssetMetadata) -> Result<()>;
}
