//! Errors raised at the script-engine call boundary.

use thiserror::Error;

/// Errors returned by [`ScriptContext::call`](crate::script::ScriptContext::call)
/// and by helpers whose policy rejects an argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// No binding with this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments.
    #[error("{function} expects {expected} argument(s), got {actual}")]
    Arity {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Argument of the wrong type.
    #[error("{function} expects a {expected} argument, got {actual}")]
    ArgumentType {
        function: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Non-positive bound passed to `random` under the `reject` policy.
    #[error("random bound must be positive, got {0}")]
    InvalidBound(i64),

    /// Reading the input into the hasher failed.
    #[error("hash failed: {0}")]
    Hash(String),
}

/// Result type for script bindings.
pub type ScriptResult<T> = Result<T, ScriptError>;
