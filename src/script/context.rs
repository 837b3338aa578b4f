//! Per-request context handed to the script engine.
//!
//! # Data Flow
//! ```text
//! WebContext (live request) + matched route pattern
//!     → ScriptContext::new (copy scalars, borrow collections, seed random)
//!     → script engine binds fields and functions by name
//!     → dropped when the script returns
//! ```
//!
//! # Design Decisions
//! - The context borrows the request, so it cannot outlive it and every
//!   lookup reads from the request that built it
//! - Scalars are copied at construction; collections are borrowed
//! - Each context owns its random generator; nothing is shared between
//!   concurrent requests
//! - Missing keys read as `""`, absent and empty are indistinguishable

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::ScriptConfig;
use crate::http::{MultiValues, WebContext};
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::hash::hash64;
use crate::script::lookup::lookup_by_expr;
use crate::script::random::ScriptRandom;
use crate::script::value::ScriptValue;

/// Tracing target for values logged by scripts.
pub const SCRIPT_LOG_TARGET: &str = "script";

pub const GET_PATH_VAR: &str = "getPathVar";
pub const GET_QUERY_VAR: &str = "getQueryVar";
pub const GET_HEADER_VAR: &str = "getHeaderVar";
pub const GET_FORM_VAR: &str = "getFormVar";
pub const LOOKUP_EXPR: &str = "lookupExpr";
pub const RANDOM: &str = "random";
pub const HASH: &str = "hash";
pub const LOG: &str = "log";

/// Snapshot of one request plus helper bindings, exposed to one script run.
pub struct ScriptContext<'r, W: WebContext + ?Sized> {
    pattern: String,
    method: String,
    path: String,
    host: String,
    headers: &'r MultiValues,
    forms: &'r MultiValues,
    queries: &'r MultiValues,
    request: &'r W,
    random: ScriptRandom,
}

impl<'r, W: WebContext + ?Sized> ScriptContext<'r, W> {
    /// Function bindings exposed to scripts, with their arity.
    pub const FUNCTIONS: &'static [(&'static str, usize)] = &[
        (GET_PATH_VAR, 1),
        (GET_QUERY_VAR, 1),
        (GET_HEADER_VAR, 1),
        (GET_FORM_VAR, 1),
        (LOOKUP_EXPR, 1),
        (RANDOM, 1),
        (HASH, 1),
        (LOG, 1),
    ];

    /// Build a context for `request` matched by `pattern`, with default settings.
    pub fn new(request: &'r W, pattern: impl Into<String>) -> Self {
        Self::with_config(request, pattern, &ScriptConfig::default())
    }

    /// Build a context for `request` matched by `pattern`.
    pub fn with_config(request: &'r W, pattern: impl Into<String>, config: &ScriptConfig) -> Self {
        Self {
            pattern: pattern.into(),
            method: request.method().to_string(),
            path: request.uri().to_string(),
            host: request.host().to_string(),
            headers: request.header_vars(),
            forms: request.form_vars(),
            queries: request.query_vars(),
            request,
            random: ScriptRandom::from_time(config.non_positive_bound),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request URI as received, query string included.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn headers(&self) -> &MultiValues {
        self.headers
    }

    pub fn forms(&self) -> &MultiValues {
        self.forms
    }

    pub fn queries(&self) -> &MultiValues {
        self.queries
    }

    /// ID of the originating request.
    pub fn request_id(&self) -> &str {
        self.request.request_id()
    }

    pub fn get_path_var(&self, key: &str) -> String {
        self.request.path_var(key)
    }

    pub fn get_query_var(&self, key: &str) -> String {
        self.request.query_var(key)
    }

    pub fn get_header_var(&self, key: &str) -> String {
        self.request.header_var(key)
    }

    pub fn get_form_var(&self, key: &str) -> String {
        self.request.form_var(key)
    }

    /// Resolve a `scope:key` expression; see [`crate::script::lookup`].
    pub fn lookup_expr(&self, expr: &str) -> String {
        lookup_by_expr(self.request, expr)
    }

    /// Uniform integer in `[0, bound)`.
    pub fn random(&mut self, bound: i64) -> ScriptResult<i64> {
        self.random.next_below(bound)
    }

    /// Stable 64-bit MurmurHash3 digest of `data`.
    pub fn hash(&self, data: &str) -> ScriptResult<u64> {
        hash64(data.as_bytes()).map_err(|err| ScriptError::Hash(err.to_string()))
    }

    /// Log one value at INFO, tagged with the request ID.
    pub fn log(&self, value: impl Into<ScriptValue>) {
        let value = value.into();
        tracing::info!(
            target: SCRIPT_LOG_TARGET,
            request_id = %self.request.request_id(),
            pattern = %self.pattern,
            "{}",
            value
        );
    }

    /// Invoke a function binding by name, as a script engine resolving
    /// globals would.
    pub fn call(&mut self, name: &str, args: &[ScriptValue]) -> ScriptResult<ScriptValue> {
        let (function, arity) = Self::FUNCTIONS
            .iter()
            .copied()
            .find(|(f, _)| *f == name)
            .ok_or_else(|| ScriptError::UnknownFunction(name.to_string()))?;

        if args.len() != arity {
            return Err(ScriptError::Arity {
                function,
                expected: arity,
                actual: args.len(),
            });
        }
        let arg = &args[0];

        let result = match function {
            GET_PATH_VAR => self.get_path_var(expect_str(function, arg)?).into(),
            GET_QUERY_VAR => self.get_query_var(expect_str(function, arg)?).into(),
            GET_HEADER_VAR => self.get_header_var(expect_str(function, arg)?).into(),
            GET_FORM_VAR => self.get_form_var(expect_str(function, arg)?).into(),
            LOOKUP_EXPR => self.lookup_expr(expect_str(function, arg)?).into(),
            RANDOM => self.random(expect_int(function, arg)?)?.into(),
            HASH => self.hash(expect_str(function, arg)?)?.into(),
            LOG => {
                self.log(arg.clone());
                ScriptValue::Null
            }
            _ => return Err(ScriptError::UnknownFunction(name.to_string())),
        };
        Ok(result)
    }
}

fn expect_str<'a>(function: &'static str, arg: &'a ScriptValue) -> ScriptResult<&'a str> {
    arg.as_str().ok_or(ScriptError::ArgumentType {
        function,
        expected: "string",
        actual: arg.type_name(),
    })
}

fn expect_int(function: &'static str, arg: &ScriptValue) -> ScriptResult<i64> {
    arg.as_i64().ok_or(ScriptError::ArgumentType {
        function,
        expected: "integer",
        actual: arg.type_name(),
    })
}

impl<W: WebContext + ?Sized> Serialize for ScriptContext<'_, W> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScriptContext", 7)?;
        state.serialize_field("pattern", &self.pattern)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("host", &self.host)?;
        state.serialize_field("headers", self.headers)?;
        state.serialize_field("forms", self.forms)?;
        state.serialize_field("queries", self.queries)?;
        state.end()
    }
}
