//! HTTP server: the axum proxy in front of NASA's APIs.
//!
//! ```text
//! request -> handlers (validation) -> NasaClient (outbound call)
//!         -> service (reshape)     -> JSON response
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;


pub use router::create_router;
pub use state::AppState;

use crate::config::Config;
use crate::error::Result;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing state...");
    let address = config.bind_address();
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await
            },
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            },
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
