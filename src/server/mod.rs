// Dating Wingman - HTTP server module
// Authenticated MCP endpoint plus unauthenticated landing and health routes

mod handlers;
mod middleware;
pub mod protocol;

pub use handlers::{create_router, handle_mcp, health_check, landing_page, HealthStatus};
pub use middleware::{auth_middleware, bearer_token, AuthGuard};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerConfig};
use crate::media::MediaNormalizer;
use crate::providers::BackendClient;
use crate::tools::{build_registry, Dispatcher, ToolContext};

/// Main server structure, shared by every request handler
pub struct WingmanServer {
    /// Tool dispatcher (owns the read-only registry)
    dispatcher: Dispatcher,
    /// Bearer-token guard for the protocol endpoint
    auth: AuthGuard,
    /// Listening address
    config: ServerConfig,
    started_at: Instant,
}

impl WingmanServer {
    pub fn new(config: ServerConfig, auth: AuthGuard, dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            auth,
            config,
            started_at: Instant::now(),
        }
    }

    /// Wire the full tool catalog and backend from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = BackendClient::from_config(&config.backend)?;
        let context = ToolContext {
            backend,
            media: MediaNormalizer::default(),
        };
        let registry = build_registry(&config.auth.validate_identity)
            .context("Failed to build tool registry")?;

        Ok(Self::new(
            config.server.clone(),
            AuthGuard::new(config.auth.bearer_token.clone()),
            Dispatcher::new(registry, context),
        ))
    }

    /// Start the HTTP server and run until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address()
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address()))?;

        let tool_count = self.dispatcher.registry().len();
        let backend_configured = self.dispatcher.context().backend.is_configured();

        let app = create_router(Arc::new(self)).layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!(
            %addr,
            tool_count,
            backend_configured,
            "Starting Dating Wingman MCP server"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn auth(&self) -> &AuthGuard {
        &self.auth
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
