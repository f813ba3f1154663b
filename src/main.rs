use anyhow::Result;
use clap::Parser;
use featured_image_generator::app::App;
use featured_image_generator::models::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "featured-image-generator")]
#[command(about = "Generate an AI featured image for a post")]
struct CliArgs {
    /// Identifier of the post to generate a featured image for.
    #[arg(value_name = "POST_ID")]
    post_id: u64,

    /// Path to the JSON post store.
    #[arg(long, value_name = "FILE")]
    posts_file: Option<std::path::PathBuf>,

    /// Directory the media library stores uploads in.
    #[arg(long, value_name = "DIR")]
    uploads_dir: Option<std::path::PathBuf>,

    /// Public base URL uploads are served under.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to the settings file.
    #[arg(long, value_name = "FILE")]
    settings_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "featured_image_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env()?;
    if let Some(posts_file) = args.posts_file {
        config.posts_path = posts_file;
    }
    if let Some(uploads_dir) = args.uploads_dir {
        config.uploads_dir = uploads_dir;
    }
    if let Some(base_url) = args.base_url {
        config.uploads_base_url = base_url;
    }
    if let Some(settings_file) = args.settings_file {
        config.settings_path = settings_file;
    }

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match app.generate_featured_image_for_post(args.post_id).await {
        Ok(asset) => {
            info!(
                "Generated featured image for post {}: attachment {} at {}",
                args.post_id, asset.id, asset.url
            );
            Ok(())
        }
        Err(e) => {
            error!("Generation failed for post {}: {}", args.post_id, e);
            std::process::exit(1);
        }
    }
}
