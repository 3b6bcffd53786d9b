use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use server::{AppState, api, config::Config};
use stock::PriceClient;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let like_store = stock::open_store(&config.db_url, &config.key_prefix)
        .await
        .context("init like store failed")?;
    let price_client = Arc::new(PriceClient::from_env().context("init price client failed")?);

    let state = AppState {
        like_store: Arc::clone(&like_store),
        price_client,
        liker: config.liker.clone(),
    };

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {} failed", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(
        listener,
        api::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    like_store.close().await?;
    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = sigint.recv()  => {},
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = ?e, "failed to install signal handlers, falling back to ctrl-c");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }

    info!("shutdown signal received");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "ctrl-c handler failed, shutting down");
    }
}
