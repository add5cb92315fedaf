//! gor demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum::serve ──▶ TraceLayer / TimeoutLayer
//!                                          │
//!                                          ▼
//!                                   RouterService (Arc<Mux>)
//!                                          │  "<METHOD> <PATH>" lookup
//!                                          ▼
//!                      request_id ─▶ access_log ─▶ [group layers] ─▶ handler
//! ```
//!
//! Routes:
//! - `GET /` and `GET /health`
//! - `GET /api/users/{id}` and `POST /api/echo` (no-store cache header)
//! - `PURGE /cache/{*key}` (custom method)

use std::path::PathBuf;
use std::time::Instant;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

use gor::config::{load_config, ServerConfig};
use gor::http::{Handler, PathParamsExt, Request};
use gor::lifecycle::{signals, Shutdown};
use gor::{HttpServer, Middleware, RouteError, Router};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Parser)]
#[command(name = "gor")]
#[command(about = "Demo server for the gor router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    gor::observability::init_logging(&config.observability)?;
    tracing::info!("gor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let router = build_router()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = signals::spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router() -> Result<Router, RouteError> {
    let mut router = Router::with_middleware([request_id(), access_log()]);

    router.get("/", Handler::new(|_req: Request| async { "gor demo\n" }), &[])?;
    router.get("/health", Handler::new(|_req: Request| async { "ok\n" }), &[])?;

    router.group(|api| {
        api.use_middleware([Middleware::from_layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))]);

        api.get("/api/users/{id}", Handler::new(show_user), &[])?;
        api.post("/api/echo", Handler::new(echo), &[])
    })?;

    router.custom("PURGE", "/cache/{*key}", Handler::new(purge), &[])?;

    Ok(router)
}

/// Tags every response with an `x-request-id`, reusing the client's if sent.
fn request_id() -> Middleware {
    Middleware::from_fn(|mut req: Request, next: Handler| async move {
        let id = match req.headers().get(&X_REQUEST_ID) {
            Some(value) => value.clone(),
            None => {
                let generated = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
                req.headers_mut().insert(X_REQUEST_ID, generated.clone());
                generated
            }
        };

        let mut res = next.run(req).await;
        res.headers_mut().insert(X_REQUEST_ID, id);
        res
    })
}

fn access_log() -> Middleware {
    Middleware::from_fn(|req: Request, next: Handler| async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let res = next.run(req).await;
        tracing::info!(
            method = %method,
            path = %path,
            status = res.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request handled"
        );
        res
    })
}

async fn show_user(req: Request) -> (StatusCode, String) {
    match req.path_param("id") {
        Some(id) => (StatusCode::OK, format!("user {id}\n")),
        None => (StatusCode::BAD_REQUEST, "missing user id\n".to_string()),
    }
}

async fn echo(req: Request) -> Result<axum::body::Bytes, StatusCode> {
    axum::body::to_bytes(req.into_body(), 64 * 1024)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)
}

async fn purge(req: Request) -> String {
    let key = req.path_param("key").unwrap_or_default();
    tracing::info!(key = %key, "Cache purge requested");
    format!("purged {key}\n")
}
