//! Script gateway.
//!
//! Serves every configured route pattern with a handler that builds the
//! request's script context and returns its bindings as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum router (configured patterns)
//!                         │  TraceLayer, request ID, timeout
//!                         ▼
//!                     ScriptRequest extractor
//!                     (pattern, path params, form body)
//!                         │
//!                         ▼
//!                     HttpWebContext ──▶ ScriptContext ──▶ script engine
//!                                          │  getPathVar / getQueryVar /
//!                                          │  getHeaderVar / getFormVar /
//!                                          │  lookupExpr / random / hash / log
//!     Client Response                      ▼
//!     ◀────────────── JSON bindings     tracing (target "script")
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use script_gateway::config::{load_config, GatewayConfig};
use script_gateway::observability::logging::init_logging;
use script_gateway::GatewayServer;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!("script-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = ?config.routes,
        request_timeout_secs = config.timeouts.request_secs,
        non_positive_bound = ?config.script.non_positive_bound,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = GatewayServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
