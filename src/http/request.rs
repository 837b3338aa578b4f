//! Request identification.
//!
//! # Responsibilities
//! - Assign a unique request ID (UUID v4) as early as possible
//! - Propagate the ID back to the client on the response
//! - Expose the ID to script contexts for log correlation
//!
//! # Design Decisions
//! - The `x-request-id` header is the single source of truth; middleware sets
//!   it when the client did not send one
//! - Requests built outside the middleware stack (tests, embedding) fall back
//!   to a freshly generated ID instead of an empty one

use std::fmt;

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the request ID carried by a header map.
pub trait RequestIdExt {
    /// The `x-request-id` value, if present, non-empty and valid UTF-8.
    fn request_id(&self) -> Option<RequestId>;

    /// The carried request ID, or a fresh one.
    fn request_id_or_new(&self) -> RequestId {
        self.request_id().unwrap_or_default()
    }
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<RequestId> {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| RequestId(v.to_string()))
    }
}

/// Layer that stamps `x-request-id` on requests lacking one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer that copies `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}
