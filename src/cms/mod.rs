//! Host content-platform collaborators
//!
//! Post storage, permission checks, and the "post saved" notification bus.
//! The workflow consumes these as opaque services; the file-backed store
//! makes the binary runnable standalone.

pub mod events;
pub mod mock;
pub mod store;

pub use events::{SaveBus, SaveListener, SavedPost};
pub use mock::MockPostStore;
pub use store::JsonPostStore;

use crate::models::{AssetId, Post, PostId, UserId};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get_post(&self, id: PostId) -> Result<Option<Post>>;

    /// Point a post's featured-image reference at an asset. Unconditional
    /// overwrite; callers decide whether an existing reference matters.
    async fn set_featured_image(&self, id: PostId, asset: AssetId) -> Result<()>;

    async fn can_edit(&self, user: UserId, post: PostId) -> Result<bool>;
}
