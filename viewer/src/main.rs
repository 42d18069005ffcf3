mod logging;
mod render;
mod settings;

use anyhow::{anyhow, Context, Result};
use posts_core::{PostFetcher, PostListStore, ReqwestTransport};
use tracing::info;

use crate::logging::init_logging;
use crate::render::render_posts;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env().context("failed to load settings")?;
    init_logging(&settings.log_level)?;

    let config = settings.fetch_config();
    let transport = ReqwestTransport::new(&config).context("failed to build HTTP client")?;
    info!(endpoint = %config.endpoint, "loading posts");

    let store = PostListStore::new(PostFetcher::new(transport), config.endpoint.clone());
    store.settled().await;

    let mut out = String::new();
    render_posts(&mut out, &store.posts()).map_err(|e| anyhow!("failed to render posts: {e}"))?;
    print!("{out}");

    Ok(())
}
