//! "Post saved" notification bus.

use crate::models::PostId;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Event emitted by the host platform whenever a post is saved.
#[derive(Debug, Clone, Copy)]
pub struct SavedPost {
    pub post_id: PostId,
    pub is_update: bool,
}

#[async_trait]
pub trait SaveListener: Send + Sync {
    async fn post_saved(&self, event: &SavedPost);
}

/// Fans save events out to registered listeners, in subscription order.
/// Listener failures are the listener's problem; dispatch never short-circuits.
#[derive(Default)]
pub struct SaveBus {
    listeners: Mutex<Vec<Arc<dyn SaveListener>>>,
}

impl SaveBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn SaveListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    pub async fn dispatch(&self, event: SavedPost) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.post_saved(&event).await;
        }
    }
}
