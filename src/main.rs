//! Service entry point: load config, open the store once, serve the router.

use collection_service::{build_router, load_from_env, store, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("collection_service=info,tower_http=info")),
        )
        .init();

    let config = load_from_env()?;
    tracing::debug!(?config, "configuration loaded");
    let store = store::open(&config.store).await?;
    let state = AppState::new(store, config.collections.iter().cloned());
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
