pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::core::engine::RelayEngine;
use crate::utils::error::{RelayError, Result};
use routes::{fetch_handler, status_handler};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RelayEngine>,
}

/// HTTP front of the relay. Built explicitly from config; holds no global state.
pub struct RelayServer {
    config: RelayConfig,
    state: AppState,
}

impl RelayServer {
    pub fn new(config: RelayConfig) -> Self {
        let engine = RelayEngine::new(config.upstream.clone());
        Self {
            config,
            state: AppState {
                engine: Arc::new(engine),
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(status_handler))
            .route("/fetch", get(fetch_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> Result<()> {
        let address = self.config.server.bind_address();
        tracing::info!("Binding to {}", address);

        let listener = TcpListener::bind(&address).await?;
        tracing::info!(
            "🚀 Relay listening on {} (upstream {})",
            address,
            self.config.upstream.base_url
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RelayError::Server {
                message: e.to_string(),
            })?;

        tracing::info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
