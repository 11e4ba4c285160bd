use anyhow::Result;
use codex_claim_http::{AppState, create_router, serve};
use codex_claim_service::ClaimService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

use crate::config::{build_connector, claim_variant};

pub(crate) async fn run(port: u16, host: String, memory_seed: Option<PathBuf>) -> Result<()> {
    let variant = claim_variant()?;
    let connector = build_connector(memory_seed.as_deref())?;
    let claim_service = Arc::new(ClaimService::new(connector, variant));
    tracing::info!(%variant, "claim variant");

    let router = create_router(Arc::new(AppState { claim_service }));
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting HTTP server on {}", addr);

    serve(listener, router, shutdown_signal()).await?;
    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            },
            Err(e) => {
                tracing::warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
