//! HTTP wiring for Verdict
//!
//! Wraps a host application's router with the health route and the layers
//! that turn handler faults and panics into JSON error responses.

mod fault_layer;
mod health;
mod panic;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use verdict_config::Config;
use verdict_messages::MessageCatalog;
use verdict_resolver::ErrorResolver;

pub use fault_layer::fault_middleware;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    resolver: Arc<ErrorResolver>,
}

impl Server {
    /// Build the server around the host's routes
    ///
    /// # Errors
    ///
    /// Returns an error if the message catalog cannot be loaded
    pub fn new(config: &Config, app: Router) -> anyhow::Result<Self> {
        let catalog = MessageCatalog::from_config(&config.messages)?;
        let resolver = Arc::new(ErrorResolver::from_config(&config.errors, Arc::new(catalog)));

        Ok(Self::with_resolver(config, app, resolver))
    }

    /// Build the server with an already assembled resolver
    ///
    /// Lets hosts supply their own message lookup.
    #[must_use]
    pub fn with_resolver(config: &Config, app: Router, resolver: Arc<ErrorResolver>) -> Self {
        let mut app = app;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Apply middleware layers (innermost first)

        // Panics become parked faults
        app = app.layer(CatchPanicLayer::custom(panic::panic_response));

        // Fault resolution
        let fault_resolver = Arc::clone(&resolver);
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let resolver = Arc::clone(&fault_resolver);
            async move { fault_layer::fault_middleware(resolver, req, next).await }
        }));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address(),
            resolver,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Resolver shared by every request
    #[must_use]
    pub fn resolver(&self) -> &ErrorResolver {
        &self.resolver
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
