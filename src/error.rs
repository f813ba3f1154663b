//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image API request failed: {0}")]
    RemoteRequestFailed(String),

    #[error("Image download failed: {0}")]
    DownloadFailed(String),

    #[error("Media storage failed: {0}")]
    StorageFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// User-facing message for the manual trigger response. Falls back to a
    /// generic string so internal detail never leaks into the UI.
    pub fn user_message(&self) -> String {
        match self {
            Error::AuthenticationFailed(_) => "Security check failed".to_string(),
            Error::PermissionDenied(_) => "You are not allowed to edit this post".to_string(),
            Error::InvalidInput(msg) => msg.clone(),
            _ => "Failed to generate the featured image".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
