//! Data models and structures
//!
//! Defines the core data structures for posts, media assets, and the wire
//! types exchanged with the image generation API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type PostId = u64;
pub type UserId = u64;
pub type AssetId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Post,
    Page,
    Attachment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PostStatus {
    Publish,
    Draft,
    AutoDraft,
    Inherit,
}

/// A content item owned by the host platform. This system only ever mutates
/// the `featured_image` reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author: UserId,
    pub post_type: PostType,
    pub status: PostStatus,
    #[serde(default)]
    pub featured_image: Option<AssetId>,
    #[serde(default)]
    pub is_revision: bool,
    #[serde(default)]
    pub is_autosave: bool,
}

/// Thumbnail variant generated alongside a stored asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeVariant {
    pub name: String,
    pub file: String,
    pub width: u32,
    pub height: u32,
}

/// Derived metadata attached to a media asset once, immediately after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetMetadata {
    pub width: u32,
    pub height: u32,
    pub sizes: Vec<SizeVariant>,
}

/// A record in the media library. Created by ingestion and owned by the
/// library afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: AssetId,
    pub url: String,
    pub file: PathBuf,
    pub mime_type: String,
    pub title: String,
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
    pub created_at: DateTime<Utc>,
}

// Image API request/response wire types. Decoding is strict: a response
// missing `data[0].url` fails to decode rather than being partially read.
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub posts_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub uploads_base_url: String,
    pub settings_path: PathBuf,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            posts_path: std::env::var("POSTS_PATH")
                .unwrap_or_else(|_| "data/posts.json".to_string())
                .into(),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            uploads_base_url: std::env::var("UPLOADS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/uploads".to_string()),
            settings_path: std::env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| "data/settings.json".to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_status_serialization_uses_kebab_case() {
        let json = serde_json::to_string(&PostStatus::AutoDraft).unwrap();
        assert_eq!(json, "\"auto-draft\"");

        let parsed: PostStatus = serde_json::from_str("\"auto-draft\"").unwrap();
        assert_eq!(parsed, PostStatus::AutoDraft);
    }

    #[test]
    fn test_post_optional_fields_default() {
        let json = r#"{
            "id": 1,
            "title": "Hello",
            "author": 7,
            "post_type": "post",
            "status": "publish"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.featured_image, None);
        assert!(!post.is_revision);
        assert!(!post.is_autosave);
    }

    #[test]
    fn test_generation_response_strict_decode() {
        let ok: GenerationResponse =
            serde_json::from_str(r#"{"data":[{"url":"http://img/x.png"}]}"#).unwrap();
        assert_eq!(ok.data[0].url, "http://img/x.png");

        // A data entry without a url must fail to decode, not be skipped.
        let missing_url = serde_json::from_str::<GenerationResponse>(r#"{"data":[{}]}"#);
        assert!(missing_url.is_err());

        let missing_data = serde_json::from_str::<GenerationResponse>(r#"{"images":[]}"#);
        assert!(missing_data.is_err());
    }

    #[test]
    fn test_generation_request_body_shape() {
        let request = GenerationRequest {
            model: "wanxiang".to_string(),
            prompt: "a red bicycle".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"wanxiang\""));
        assert!(json.contains("\"prompt\":\"a red bicycle\""));
    }
}
