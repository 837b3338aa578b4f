//! Expression lookup against a web request.
//!
//! # Responsibilities
//! - Parse `scope:key` expressions (`query:page`, `header:X-Token`, ...)
//! - Resolve them against a [`WebContext`]
//!
//! # Design Decisions
//! - Parsing returns `Result`; the script-facing [`lookup_by_expr`] coerces
//!   every failure to `""` so scripts test emptiness instead of handling errors
//! - Scope names are case-insensitive; whitespace around scope and key is
//!   ignored, the key itself is otherwise passed through untouched
//! - Only the first `:` separates scope from key

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::http::WebContext;

/// Where a lookup expression reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Query,
    Path,
    Header,
    Form,
    /// Query first, then form.
    Param,
    /// Request scalars: `method`, `uri`, `path`, `host`, `id`.
    Request,
}

impl FromStr for Scope {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(Scope::Query),
            "path" => Ok(Scope::Path),
            "header" => Ok(Scope::Header),
            "form" => Ok(Scope::Form),
            "param" => Ok(Scope::Param),
            "request" => Ok(Scope::Request),
            _ => Err(ExprError::UnknownScope(s.to_string())),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Query => "query",
            Scope::Path => "path",
            Scope::Header => "header",
            Scope::Form => "form",
            Scope::Param => "param",
            Scope::Request => "request",
        };
        f.write_str(name)
    }
}

/// Parsed `scope:key` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupExpr<'a> {
    pub scope: Scope,
    pub key: &'a str,
}

/// Reasons an expression cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("missing ':' separator in expression {0:?}")]
    MissingSeparator(String),

    #[error("unknown lookup scope {0:?}")]
    UnknownScope(String),

    #[error("empty key in expression {0:?}")]
    EmptyKey(String),
}

/// Parse a `scope:key` expression.
pub fn parse_expr(expr: &str) -> Result<LookupExpr<'_>, ExprError> {
    let (scope, key) = expr
        .split_once(':')
        .ok_or_else(|| ExprError::MissingSeparator(expr.to_string()))?;

    let scope = scope.trim().parse::<Scope>()?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ExprError::EmptyKey(expr.to_string()));
    }

    Ok(LookupExpr { scope, key })
}

/// Resolve a parsed expression; absent values yield `""`.
pub fn eval_expr<W: WebContext + ?Sized>(webc: &W, expr: &LookupExpr<'_>) -> String {
    let key = expr.key;
    match expr.scope {
        Scope::Query => webc.query_var(key),
        Scope::Path => webc.path_var(key),
        Scope::Header => webc.header_var(key),
        Scope::Form => webc.form_var(key),
        Scope::Param => match webc.query_vars().first(key) {
            Some(value) => value.to_string(),
            None => webc.form_var(key),
        },
        Scope::Request => request_scalar(webc, key),
    }
}

fn request_scalar<W: WebContext + ?Sized>(webc: &W, key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "method" => webc.method().to_string(),
        "uri" => webc.uri().to_string(),
        "path" => webc
            .uri()
            .split_once('?')
            .map(|(path, _)| path)
            .unwrap_or(webc.uri())
            .to_string(),
        "host" => webc.host().to_string(),
        "id" | "request_id" => webc.request_id().to_string(),
        _ => String::new(),
    }
}

/// Parse and resolve `expr`, mapping every failure to `""`.
pub fn lookup_by_expr<W: WebContext + ?Sized>(webc: &W, expr: &str) -> String {
    match parse_expr(expr) {
        Ok(parsed) => eval_expr(webc, &parsed),
        Err(err) => {
            tracing::debug!(
                request_id = %webc.request_id(),
                error = %err,
                "Unresolvable lookup expression"
            );
            String::new()
        }
    }
}
