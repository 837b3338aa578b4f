//! Script gateway library.
//!
//! Builds the per-request context that embedded scripts see: request fields,
//! lookup bindings, and random/hash/log helpers.

pub mod config;
pub mod http;
pub mod observability;
pub mod script;

pub use config::GatewayConfig;
pub use http::{GatewayServer, HttpWebContext, MultiValues, WebContext};
pub use script::{ScriptContext, ScriptError, ScriptValue};
