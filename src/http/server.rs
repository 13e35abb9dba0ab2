//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::{require_non_blank, ApiError};
use crate::http::health::health;
use crate::http::request::make_request_span;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::rpc::RpcClient;
use crate::{identity, recipe};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    rpc: Arc<dyn RpcClient>,
    strict_validation: bool,
}

impl AppState {
    pub fn new(rpc: Arc<dyn RpcClient>, strict_validation: bool) -> Self {
        Self {
            rpc,
            strict_validation,
        }
    }

    /// The shared remote procedure client.
    pub fn rpc(&self) -> &dyn RpcClient {
        self.rpc.as_ref()
    }

    /// Whether a blank key should short-circuit to an empty answer.
    ///
    /// Routes that never fail use this instead of [`Self::check_non_blank`]:
    /// with strict validation a blank key gets the `null` body without a
    /// remote call.
    pub fn skips_blank(&self, field: &str, value: &str) -> bool {
        let skip = self.strict_validation && value.trim().is_empty();
        if skip {
            tracing::debug!(field, "Blank key, skipping remote call");
        }
        skip
    }

    /// Reject blank values when strict validation is enabled.
    pub fn check_non_blank(&self, field: &str, value: &str) -> Result<(), ApiError> {
        if self.strict_validation {
            require_non_blank(field, value)?;
        }
        Ok(())
    }
}

/// HTTP server for the recipe gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an already constructed client.
    pub fn new(config: GatewayConfig, rpc: Arc<dyn RpcClient>) -> Self {
        let state = AppState::new(rpc, config.security.strict_validation);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .merge(identity::router())
            .merge(recipe::router())
            .route("/health", get(health))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
