//! Image generation API integration
//!
//! Turns a post title into a prompt and requests a generated image from the
//! configured remote endpoint, yielding the image's URL.

pub mod client;
pub mod mock;

pub use client::ImageApiClient;
pub use mock::MockImageApi;

use crate::settings::Settings;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageApi: Send + Sync {
    /// Request a generated image for a post title. Returns the remote URL of
    /// the image on success.
    async fn request_image(&self, title: &str, settings: &Settings) -> Result<String>;
}
