use super::PostStore;
use crate::models::{AssetId, Post, PostId, UserId};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockPostStore {
    posts: Arc<Mutex<HashMap<PostId, Post>>>,
    can_edit_response: Arc<Mutex<bool>>,
    set_featured_count: Arc<Mutex<usize>>,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(HashMap::new())),
            can_edit_response: Arc::new(Mutex::new(true)),
            set_featured_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().insert(post.id, post);
        self
    }

    pub fn with_can_edit(self, allowed: bool) -> Self {
        *self.can_edit_response.lock().unwrap() = allowed;
        self
    }

    pub fn get_set_featured_count(&self) -> usize {
        *self.set_featured_count.lock().unwrap()
    }

    pub fn featured_image_of(&self, id: PostId) -> Option<AssetId> {
        self.posts
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|post| post.featured_image)
    }
}

impl Default for MockPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn set_featured_image(&self, id: PostId, asset: AssetId) -> Result<()> {
        let mut count = self.set_featured_count.lock().unwrap();
        *count += 1;

        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&id)
            .ok_or_else(|| Error::InvalidInput(format!("No post with id {}", id)))?;
        post.featured_image = Some(asset);
        Ok(())
    }

    async fn can_edit(&self, _user: UserId, _post: PostId) -> Result<bool> {
        Ok(*self.can_edit_response.lock().unwrap())
    }
}
