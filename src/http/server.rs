//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one inspection handler per configured pattern
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build a script context for every request and expose its bindings
//! - Bind server to listener with graceful shutdown

use std::time::Duration;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GatewayConfig, ScriptConfig};
use crate::http::extract::ScriptRequest;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::web_context::HttpWebContext;
use crate::script::ScriptContext;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub script: ScriptConfig,
}

impl FromRef<AppState> for ScriptConfig {
    fn from_ref(state: &AppState) -> Self {
        state.script.clone()
    }
}

/// One function binding as listed to clients.
#[derive(Debug, Serialize)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub arity: usize,
}

/// Body returned by the inspection handler.
#[derive(Serialize)]
pub struct Inspection<'a> {
    pub request_id: &'a str,
    pub context: &'a ScriptContext<'a, HttpWebContext>,
    pub functions: Vec<FunctionInfo>,
}

/// HTTP server for the script gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let router = build_router(&config);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &GatewayConfig) -> Router {
    let state = AppState {
        script: config.script.clone(),
    };

    let mut router = Router::new();
    for pattern in &config.routes {
        router = router.route(pattern, any(inspect_handler));
    }

    router
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(TraceLayer::new_for_http())
}

/// Build the request's script context, log through it and return its bindings.
async fn inspect_handler(State(state): State<AppState>, request: ScriptRequest) -> Response {
    let ctx = ScriptContext::with_config(&request.web, request.pattern.as_str(), &state.script);
    ctx.log(format!("{} {}", ctx.method(), ctx.path()));

    let functions = ScriptContext::<HttpWebContext>::FUNCTIONS
        .iter()
        .map(|&(name, arity)| FunctionInfo { name, arity })
        .collect();

    Json(Inspection {
        request_id: ctx.request_id(),
        context: &ctx,
        functions,
    })
    .into_response()
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
