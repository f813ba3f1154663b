use super::PostStore;
use crate::models::{AssetId, Post, PostId, UserId};
use crate::{Error, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Post store backed by a JSON file of posts. Loaded once at open; the file
/// is rewritten whenever a featured image is assigned.
pub struct JsonPostStore {
    path: PathBuf,
    posts: Mutex<Vec<Post>>,
}

impl JsonPostStore {
    pub fn open(path: &Path) -> Result<Self> {
        let posts = if path.exists() {
            let json = fs::read_to_string(path)?;
            serde_json::from_str(&json)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            posts: Mutex::new(posts),
        })
    }

    fn persist(&self, posts: &[Post]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(posts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for JsonPostStore {
    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn set_featured_image(&self, id: PostId, asset: AssetId) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();

        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| Error::InvalidInput(format!("No post with id {}", id)))?;
        post.featured_image = Some(asset);

        self.persist(&posts)
    }

    async fn can_edit(&self, user: UserId, post: PostId) -> Result<bool> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post)
            .map(|p| p.author == user)
            .unwrap_or(false))
    }
}
