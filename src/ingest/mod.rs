//! Asset ingestion: download a remote image and land it in the media library
//!
//! The pipeline downloads the generated image to a scoped temporary file,
//! sideloads it into persistent storage, inserts a library record, and
//! attaches derived metadata.

pub mod mock;
pub mod pipeline;

pub use mock::MockIngestor;
pub use pipeline::Ingestor;

use crate::models::MediaAsset;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait IngestService: Send + Sync {
    /// Download `image_url` and store it as a new media asset named after
    /// `title`. Repeated calls with the same inputs create distinct assets.
    async fn ingest(&self, image_url: &str, title: &str) -> Result<MediaAsset>;
}

/// Strip a file name down to characters safe for the uploads directory:
/// alphanumerics (any script), `.`, `_` and `-`. Whitespace runs collapse to
/// a single dash, everything else is dropped.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.trim().chars() {
        if ch.is_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else if ch.is_whitespace() {
            pending_dash = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_spaces_with_dashes() {
        assert_eq!(
            sanitize_file_name("a red bicycle-ai-generated.png"),
            "a-red-bicycle-ai-generated.png"
        );
    }

    #[test]
    fn test_sanitize_drops_special_characters() {
        assert_eq!(
            sanitize_file_name("what? a *bike*!.png"),
            "what-a-bike.png"
        );
    }

    #[test]
    fn test_sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize_file_name("a   b\t c.png"), "a-b-c.png");
    }

    #[test]
    fn test_sanitize_keeps_non_latin_titles() {
        assert_eq!(sanitize_file_name("红色自行车.png"), "红色自行车.png");
    }
}
