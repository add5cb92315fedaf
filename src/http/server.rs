//! HTTP server hosting a router.
//!
//! # Responsibilities
//! - Mount the frozen router behind an Axum service
//! - Wire up host-level layers (request tracing, request timeout)
//! - Serve connections until the shutdown signal fires

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router as AxumRouter;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::routing::{Router, RouterService};

/// HTTP server for a configured [`Router`].
pub struct HttpServer {
    app: AxumRouter,
    config: ServerConfig,
}

impl HttpServer {
    /// Freeze `router` and prepare it for serving.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let service = router.into_service();
        for key in service.routes() {
            tracing::info!(route = %key, "Route mounted");
        }

        let app = Self::build_app(&config, service);
        Self { app, config }
    }

    /// Build the Axum app with host-level middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, service: RouterService) -> AxumRouter {
        AxumRouter::new()
            .fallback_service(service)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.app.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
