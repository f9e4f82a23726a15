//! HTTP server lifecycle: storage setup, router assembly and graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings, StorageBackend};
use crate::db::establish_async_connection_pool;
use crate::repositories::{MemoryUserStore, PgUserStore, UserStore};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Connection pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        // The URL may carry credentials; never log it.
        tracing::info!(
            backend = %self.settings.database.backend,
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            "Database configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let users = self.build_store().await?;
        if let Err(e) = users.ping().await {
            tracing::warn!(error = %e, "Storage is not reachable yet, continuing startup");
        }

        let state = AppState::new(users);
        let router = create_router(
            state,
            Duration::from_secs(self.settings.server.request_timeout),
        );
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn build_store(&self) -> anyhow::Result<Arc<dyn UserStore>> {
        match self.settings.database.backend {
            StorageBackend::Postgres => {
                tracing::info!("Initializing database connection pool...");
                let pool = establish_async_connection_pool(&self.settings.database)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, "Failed to initialize connection pool");
                        anyhow::anyhow!("Failed to initialize connection pool: {}", e)
                    })?;
                tracing::info!("Database connection pool initialized");
                Ok(Arc::new(PgUserStore::new(pool)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on shutdown");
                Ok(Arc::new(MemoryUserStore::new()))
            }
        }
    }
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A handler that fails to install is logged and never fires, so the other
/// signal still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
