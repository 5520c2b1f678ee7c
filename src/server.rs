// ABOUTME: HTTP server assembly and lifecycle for the FitBot chat API
// ABOUTME: Builds the router with CORS and tracing layers, serves, and shuts down gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use fitbot_core::errors::{AppError, AppResult};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{CorsConfig, ServerConfig};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::ChatRoutes;

/// Build the application router
pub fn router(resources: Arc<ServerResources>, cors: &CorsConfig) -> Router {
    ChatRoutes::routes(resources)
        .layer(setup_cors(cors))
        .layer(TraceLayer::new_for_http())
}

/// The `FitBot` HTTP server
pub struct FitbotServer {
    config: ServerConfig,
    resources: Arc<ServerResources>,
}

impl FitbotServer {
    /// Create a server from configuration and composed resources
    #[must_use]
    pub fn new(config: ServerConfig, resources: ServerResources) -> Self {
        Self {
            config,
            resources: Arc::new(resources),
        }
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails
    pub async fn run(self) -> AppResult<()> {
        let bind_address = self.config.bind_address();
        let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
            AppError::internal(format!("Failed to bind {bind_address}")).with_source(e)
        })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves, then
    /// close the history store
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("FitBot server listening on http://{addr}");
        }

        let app = router(Arc::clone(&self.resources), &self.config.cors);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| AppError::internal("HTTP server failed").with_source(e))?;

        info!("Server shutting down gracefully");
        self.resources.database.close().await;
        info!("Shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
