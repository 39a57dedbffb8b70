//! # fixcal API Server
//!
//! Publishes MRHA team fixtures as iCalendar feeds that calendar clients can
//! subscribe to. Each team's calendar is scraped on first request and kept in
//! a [`MemoCache`](fixcal_cache::MemoCache) for the configured TTL.
//!
//! ## Endpoints
//!
//! - `GET /calendar/mrha/?teamId=<id>` - Calendar feed for a team
//! - `DELETE /calendar/mrha/?teamId=<id>` - Drop a team's cached calendar
//!   (bearer `ADMIN_TOKEN` required)
//! - `GET /health` - Liveness and cache summary
//!
//! Plain HTTP by default. With a [`TlsConfig`] the server terminates HTTPS
//! itself, obtaining a Let's Encrypt certificate for that one domain.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fixcal_api::{ApiConfig, ApiServer};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 59463)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{
    AdminToken, AppState, ApiConfig, TlsConfig, DEFAULT_ACME_CACHE_DIR,
    DEFAULT_HEADER_READ_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::ApiError;

use std::any::Any;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Router;
use axum_server::Handle;
use futures::StreamExt;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use rustls_acme::axum::AxumAcceptor;
use rustls_acme::caches::DirCache;
use rustls_acme::AcmeConfig;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fixcal_core::error::Result;

/// Time in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// API server for fixture calendars.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes and middleware configured.
    pub fn router(&self) -> Router {
        with_layers(create_router(self.state.clone()), &self.state.config)
    }

    /// Binds `addr` and serves until Ctrl-C.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr.into())?;
        self.serve(listener).await
    }

    /// Serves on a bound listener until Ctrl-C, then drains in-flight requests
    /// and stops the cache's expiry timers.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let config = &self.state.config;

        let handle = Handle::new();
        tokio::spawn(shutdown_on_signal(handle.clone()));
        let app = self.router().into_make_service();

        match &config.tls {
            Some(tls) => {
                info!(domain = %tls.domain, ttl_secs = config.cache.ttl_seconds, "fixcal https listener on {}", addr);
                let mut server = axum_server::from_tcp(listener)
                    .acceptor(acme_acceptor(tls))
                    .handle(handle);
                configure_connections(server.http_builder(), config);
                server.serve(app).await?;
            }
            None => {
                info!(ttl_secs = config.cache.ttl_seconds, "fixcal http listener on {}", addr);
                let mut server = axum_server::from_tcp(listener).handle(handle);
                configure_connections(server.http_builder(), config);
                server.serve(app).await?;
            }
        }

        info!("Server stopped, shutting down cache");
        self.state.cache.shutdown().await;
        Ok(())
    }
}

fn with_layers(router: Router, config: &ApiConfig) -> Router {
    // Browsers may read feeds cross-origin; nothing else.
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET])
        .allow_headers(AnyOrigin);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "Request handler panicked");

    ApiError::internal("An internal error occurred").into_response()
}

fn configure_connections(builder: &mut Builder<TokioExecutor>, config: &ApiConfig) {
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(config.header_read_timeout());
}

/// Certificate resolver for `tls.domain` only. Renewal runs in a background
/// task driven by the ACME event stream.
fn acme_acceptor(tls: &TlsConfig) -> AxumAcceptor {
    let mut state = AcmeConfig::new([tls.domain.as_str()])
        .contact(tls.contact.iter().map(|email| format!("mailto:{}", email)))
        .cache(DirCache::new(tls.cache_dir.clone()))
        .directory_lets_encrypt(tls.production)
        .state();
    let acceptor = state.axum_acceptor(state.default_rustls_config());

    tokio::spawn(async move {
        while let Some(event) = state.next().await {
            match event {
                Ok(ok) => info!(event = ?ok, "ACME event"),
                Err(err) => error!(error = ?err, "ACME error"),
            }
        }
    });

    acceptor
}

async fn shutdown_on_signal(handle: Handle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        return;
    }
    info!("Shutdown signal received");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
