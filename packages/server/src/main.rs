use std::sync::Arc;

use anyhow::Context;
use common::storage::FilesystemFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use school_server::config::AppConfig;
use school_server::database::init_db;
use school_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let avatar_store = FilesystemFileStore::from_config(&config.storage)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare avatar directory {}",
                config.storage.avatars_dir.display()
            )
        })?;
    info!(path = %avatar_store.base_path().display(), "Avatar store ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config,
        avatar_store: Arc::new(avatar_store),
    };

    let app = school_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
