//! Facility Server
//!
//! HTTP server exposing the current parking facility snapshot.
//! The store gateway is injected, so the server runs the same against
//! SQLite, an in-memory mock, or anything else implementing
//! [`FacilityGateway`].

mod handlers;
pub mod logging_middleware;
pub mod response;

pub use handlers::{AppState, HealthResponse};
pub use response::{build_response, ResponseBuilder, ResponsePayload};

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::Method,
    middleware,
    routing::get,
    Router,
};
use otopark_core::{FacilityGateway, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Paths serving the facility envelope.
///
/// `/get_parking_data.php` keeps the URL existing mobile builds call.
pub const FACILITY_PATHS: &[&str] = &["/", "/get_parking_data.php", "/api/parking"];

/// Facility HTTP server
///
/// Follows Dependency Injection: the gateway comes in through the
/// constructor and the server holds no other state.
pub struct FacilityServer {
    config: ServerConfig,
    gateway: Arc<dyn FacilityGateway>,
}

impl FacilityServer {
    pub fn new(config: ServerConfig, gateway: Arc<dyn FacilityGateway>) -> Self {
        info!(
            "[Server] Initializing (max store connections: {}, error details: {})",
            config.max_connections,
            if config.expose_error_details {
                "exposed"
            } else {
                "hidden"
            }
        );
        Self { config, gateway }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        let app_state = AppState {
            gateway: self.gateway.clone(),
            builder: ResponseBuilder::new(self.config.expose_error_details),
        };

        let mut router = Router::new().route("/health", get(handlers::health));
        for path in FACILITY_PATHS {
            router = router.route(path, get(handlers::get_parking_data));
        }

        // Answers browser preflights; the envelope sets its own
        // Access-Control-Allow-Origin on every facility response. Sits inside
        // the logging middleware so preflights are traced too.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any);

        router
            .with_state(app_state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(
                logging_middleware::http_logging_middleware,
            ))
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .context("Failed to read listener address")?;
        info!("[Server] Ready on http://{}", local);

        let router = self.router();
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")?;

        info!("[Server] Stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("[Server] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[Server] Shutdown signal received");
}
