//! FIDE Server - Main entry point

use anyhow::Result;
use fide_common::logging::{init_logging, LogConfig};
use fide_server::{api, config::Config, db};
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("fide-server")
        .filter_directives("fide_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting FIDE Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;
    info!("Database migrations completed");

    let app = api::create_router(pool.clone(), &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(());
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
        },
        _ = shutdown_signal() => {
            let _ = shutdown_tx.send(());
            let drain = Duration::from_secs(config.server.shutdown_timeout_secs);
            info!("Waiting up to {} seconds for connections to close", drain.as_secs());

            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => result??,
                Err(_) => {
                    warn!("Connections still open after shutdown timeout, aborting");
                    server.abort();
                },
            }
        },
    }

    pool.close().await;
    info!("Server shut down gracefully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
