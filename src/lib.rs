//! AI featured image generation for content posts
//!
//! Requests an AI-generated image from a remote HTTP API based on a post's
//! title, ingests the result into a media library, and assigns it as the
//! post's featured image. Generation runs either from an authenticated
//! manual request or from the "post saved" event.

pub mod api;
pub mod app;
pub mod cms;
pub mod error;
pub mod ingest;
pub mod media;
pub mod models;
pub mod nonce;
pub mod prompts;
pub mod settings;

pub use error::{Error, Result};
