use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use loganalyzer_api::app_state::build_app_state;
use loganalyzer_api::config::AppConfig;
use loganalyzer_api::logging::init_tracing;
use loganalyzer_api::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&config.log_dir)?;

    info!(
        addr = %config.server_addr,
        backend = %config.backend_url,
        windows_stacks = ?config.windows_stacks,
        linux_stacks = ?config.linux_stacks,
        "Starting log analyzer API"
    );

    let state = build_app_state(&config)?;
    let app = app_router().with_state(state);

    let listener = TcpListener::bind(&config.server_addr).await?;
    info!("🚀 Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(?e, "Failed to listen for Ctrl-C");
            // Leave shutdown to the other signal.
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
