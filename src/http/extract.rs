//! Axum extractor producing the inputs of a script context.
//!
//! # Responsibilities
//! - Read the matched route pattern (`MatchedPath`)
//! - Read path variables (`RawPathParams`)
//! - Buffer url-encoded form bodies up to a limit
//!
//! # Design Decisions
//! - Non-form bodies are never buffered
//! - Routes without parameters yield empty path variables, not a rejection
//! - The form limit comes from `ScriptConfig` when the state provides one

use axum::{
    body::{Body, Bytes},
    extract::{
        rejection::RawPathParamsRejection, FromRef, FromRequest, FromRequestParts, MatchedPath,
        RawPathParams, Request,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use thiserror::Error;

use crate::config::ScriptConfig;
use crate::http::web_context::{is_form_urlencoded, HttpWebContext};

/// A received request ready to back a `ScriptContext`.
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    /// Matched route pattern, empty when the request was not routed.
    pub pattern: String,
    pub web: HttpWebContext,
}

/// Why a request could not be turned into a [`ScriptRequest`].
#[derive(Debug, Error)]
pub enum ScriptRequestRejection {
    #[error("form body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error(transparent)]
    PathParams(#[from] RawPathParamsRejection),
}

impl IntoResponse for ScriptRequestRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            ScriptRequestRejection::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ScriptRequestRejection::BodyRead(_) => StatusCode::BAD_REQUEST,
            ScriptRequestRejection::PathParams(rejection) => rejection.status(),
        };
        tracing::debug!(status = %status, error = %self, "Rejected script request");
        (status, self.to_string()).into_response()
    }
}

impl<S> FromRequest<S> for ScriptRequest
where
    S: Send + Sync,
    ScriptConfig: FromRef<S>,
{
    type Rejection = ScriptRequestRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = ScriptConfig::from_ref(state);
        let (mut parts, body) = req.into_parts();

        let pattern = parts
            .extensions
            .get::<MatchedPath>()
            .map(|matched| matched.as_str().to_string())
            .unwrap_or_default();

        let path_vars: Vec<(String, String)> =
            match RawPathParams::from_request_parts(&mut parts, state).await {
                Ok(params) => params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                Err(RawPathParamsRejection::MissingPathParams(_)) => Vec::new(),
                Err(rejection) => return Err(rejection.into()),
            };

        let body = if is_form_urlencoded(&parts.headers) {
            read_form_body(body, config.max_form_bytes).await?
        } else {
            Default::default()
        };

        Ok(Self {
            pattern,
            web: HttpWebContext::from_parts(&parts, &body, path_vars),
        })
    }
}

async fn read_form_body(body: Body, limit: usize) -> Result<Bytes, ScriptRequestRejection> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => {
            Err(ScriptRequestRejection::PayloadTooLarge { limit })
        }
        Err(err) => Err(ScriptRequestRejection::BodyRead(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_within_limit_is_read() {
        let bytes = read_form_body(Body::from("a=1&b=2"), 7).await.unwrap();
        assert_eq!(&bytes[..], b"a=1&b=2");
    }

    #[tokio::test]
    async fn test_body_over_limit_is_payload_too_large() {
        let err = read_form_body(Body::from("a=12345678"), 4).await.unwrap_err();
        assert!(matches!(err, ScriptRequestRejection::PayloadTooLarge { limit: 4 }));
        assert_eq!(
            err.into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[tokio::test]
    async fn test_empty_body_with_zero_limit() {
        let bytes = read_form_body(Body::empty(), 0).await.unwrap();
        assert!(bytes.is_empty());
    }
}
