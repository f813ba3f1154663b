//! Prompt construction from post titles.
//!
//! The template asks the generator for a high-definition picture of the
//! title subject without garbled text. It is kept verbatim from the service
//! this API was originally used with, so the remote model keeps seeing the
//! phrasing it was tuned against.

use crate::{Error, Result};

const PROMPT_PREFIX: &str = "帮我画出一张";
const PROMPT_SUFFIX: &str = "的高清图片，图片中不要出现文字乱码。";

/// Normalize a post title for prompting: trim whitespace and strip a
/// trailing literal `.txt` suffix.
///
/// The suffix strip is a compatibility quirk carried over from earlier
/// deployments where titles were derived from file names; it rarely fires
/// for normal titles.
pub fn clean_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    let cleaned = trimmed.strip_suffix(".txt").unwrap_or(trimmed).trim_end();

    if cleaned.is_empty() {
        return Err(Error::InvalidInput("Post title is empty".to_string()));
    }

    Ok(cleaned.to_string())
}

/// Build the generation prompt for a cleaned title.
pub fn build_prompt(title: &str) -> String {
    format!("{}{}{}", PROMPT_PREFIX, title, PROMPT_SUFFIX)
}
