//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, inspection handler)
//!     → request.rs (assign and propagate request ID)
//!     → extract.rs (matched pattern, path params, form body)
//!     → web_context.rs (HttpWebContext: the script-visible request)
//!     → script::ScriptContext
//! ```

pub mod extract;
pub mod request;
pub mod server;
pub mod values;
pub mod web_context;

pub use extract::{ScriptRequest, ScriptRequestRejection};
pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, GatewayServer};
pub use values::MultiValues;
pub use web_context::{canonical_header_name, HttpWebContext, WebContext};
