//! Script context subsystem.
//!
//! # Data Flow
//! ```text
//! WebContext + route pattern
//!     → context.rs (ScriptContext: fields + bindings)
//!         → lookup.rs (lookupExpr)
//!         → random.rs (random)
//!         → hash.rs (hash)
//!         → tracing target "script" (log)
//!     → script engine (out of crate)
//! ```
//!
//! # Design Decisions
//! - Binding names match what scripts call (`getPathVar`, `lookupExpr`, ...)
//! - Values crossing the engine boundary are a closed enum (`ScriptValue`)
//! - Dynamic calls fail with typed `ScriptError`s, lookups never fail

pub mod context;
pub mod error;
pub mod hash;
pub mod lookup;
pub mod random;
pub mod value;

pub use context::{ScriptContext, SCRIPT_LOG_TARGET};
pub use error::{ScriptError, ScriptResult};
pub use hash::hash64;
pub use lookup::{lookup_by_expr, parse_expr, ExprError, LookupExpr, Scope};
pub use random::ScriptRandom;
pub use value::ScriptValue;
