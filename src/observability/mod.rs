//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway events (server, extraction, lookups)
//!     → tracing events (target: script_gateway::*)
//! Script log() calls
//!     → tracing events (target: script, fields: request_id, pattern)
//! Both
//!     → logging.rs (EnvFilter + fmt subscriber) → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every script log line
//! - Filtering is configured once at startup

pub mod logging;
