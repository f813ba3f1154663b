//! Application orchestration for featured-image generation.
//!
//! Wires the image API, ingestion pipeline, post store, and settings seam
//! together, and exposes the two triggers: the authenticated manual request
//! and the automatic "post saved" listener.

use crate::api::{ImageApi, ImageApiClient};
use crate::cms::{JsonPostStore, PostStore, SaveListener, SavedPost};
use crate::ingest::{IngestService, Ingestor};
use crate::media::FsMediaLibrary;
use crate::models::{Config, MediaAsset, PostId, PostStatus, PostType, UserId};
use crate::nonce::NonceStore;
use crate::settings::{FileSettingsStore, SettingsProvider};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Manual trigger input: the acting user, their anti-forgery token, and the
/// target post.
#[derive(Debug, Clone)]
pub struct ManualGenerateRequest {
    pub post_id: PostId,
    pub user_id: UserId,
    pub nonce: String,
}

/// Manual trigger success payload, shaped for immediate UI update.
#[derive(Debug, Clone)]
pub struct ManualGenerateResponse {
    pub message: String,
    pub thumbnail_markup: String,
    pub image_url: String,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub api: Box<dyn ImageApi>,
    pub ingest: Box<dyn IngestService>,
    pub posts: Arc<dyn PostStore>,
    pub settings: Box<dyn SettingsProvider>,
}

/// Coordinates image generation, ingestion, and featured-image assignment.
pub struct App {
    api: Box<dyn ImageApi>,
    ingest: Box<dyn IngestService>,
    posts: Arc<dyn PostStore>,
    settings: Box<dyn SettingsProvider>,
    nonces: NonceStore,
    allowed_types: Vec<PostType>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            api: services.api,
            ingest: services.ingest,
            posts: services.posts,
            settings: services.settings,
            nonces: NonceStore::new(),
            allowed_types: vec![PostType::Post, PostType::Page],
        }
    }

    /// Restrict the automatic trigger to a different set of post types.
    pub fn with_allowed_types(mut self, types: Vec<PostType>) -> Self {
        self.allowed_types = types;
        self
    }

    /// Construct an app from process configuration with the real clients.
    pub fn new(config: &Config) -> Result<Self> {
        let library = Arc::new(FsMediaLibrary::open(
            &config.uploads_dir,
            &config.uploads_base_url,
        )?);
        let posts = Arc::new(JsonPostStore::open(&config.posts_path)?);

        info!(
            "Media library at {}, posts at {}",
            config.uploads_dir.display(),
            config.posts_path.display()
        );

        Ok(Self::with_services(AppServices {
            api: Box::new(ImageApiClient::new()),
            ingest: Box::new(Ingestor::new(library)),
            posts,
            settings: Box::new(FileSettingsStore::new(&config.settings_path)),
        }))
    }

    /// Token issuer for manual-trigger callers.
    pub fn nonces(&self) -> &NonceStore {
        &self.nonces
    }

    /// The full workflow: title → image request → ingestion → featured-image
    /// assignment. Any failure aborts the invocation; nothing is retried.
    pub async fn generate_featured_image_for_post(&self, post_id: PostId) -> Result<MediaAsset> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| Error::InvalidInput(format!("Post {} not found", post_id)))?;

        if post.title.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "Post {} has an empty title",
                post_id
            )));
        }

        // Settings are loaded fresh per invocation so admin edits apply
        // without a restart.
        let settings = self.settings.load()?;

        let image_url = self.api.request_image(&post.title, &settings).await?;
        debug!("Image API returned {}", image_url);

        let asset = self.ingest.ingest(&image_url, post.title.trim()).await?;

        self.posts.set_featured_image(post_id, asset.id).await?;
        info!(
            "Assigned attachment {} as featured image of post {}",
            asset.id, post_id
        );

        Ok(asset)
    }

    /// Manual trigger. Verifies the anti-forgery token before anything else,
    /// then edit permission, then runs the workflow.
    pub async fn handle_manual_generate(
        &self,
        request: &ManualGenerateRequest,
    ) -> Result<ManualGenerateResponse> {
        if !self.nonces.verify(request.user_id, &request.nonce) {
            return Err(Error::AuthenticationFailed(format!(
                "Invalid nonce for user {}",
                request.user_id
            )));
        }

        if !self.posts.can_edit(request.user_id, request.post_id).await? {
            return Err(Error::PermissionDenied(format!(
                "User {} cannot edit post {}",
                request.user_id, request.post_id
            )));
        }

        let asset = self.generate_featured_image_for_post(request.post_id).await?;

        Ok(ManualGenerateResponse {
            message: "Featured image generated".to_string(),
            thumbnail_markup: format!(
                "<img src=\"{}\" alt=\"{}\" class=\"featured-image-preview\" />",
                asset.url, asset.title
            ),
            image_url: asset.url,
        })
    }
}

#[async_trait]
impl SaveListener for App {
    /// Automatic trigger. Fire-and-forget: every skip and failure is only
    /// logged, the save itself never fails because of us.
    async fn post_saved(&self, event: &SavedPost) {
        let settings = match self.settings.load() {
            Ok(settings) => settings,
            Err(e) => {
                error!("Could not load settings on save event: {}", e);
                return;
            }
        };
        if !settings.auto_generate {
            return;
        }

        let post = match self.posts.get_post(event.post_id).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                warn!("Save event for unknown post {}", event.post_id);
                return;
            }
            Err(e) => {
                error!("Could not load post {}: {}", event.post_id, e);
                return;
            }
        };

        if post.featured_image.is_some()
            || post.is_revision
            || post.is_autosave
            || post.status == PostStatus::AutoDraft
        {
            debug!("Skipping auto-generation for post {}", event.post_id);
            return;
        }

        if !self.allowed_types.contains(&post.post_type) {
            debug!(
                "Skipping auto-generation for post {}: type not allowed",
                event.post_id
            );
            return;
        }

        if let Err(e) = self.generate_featured_image_for_post(event.post_id).await {
            error!(
                "Automatic generation failed for post {}: {}",
                event.post_id, e
            );
        }
    }
}
