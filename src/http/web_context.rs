//! Web request abstraction consumed by script contexts.
//!
//! # Responsibilities
//! - Define the capability set a script context reads from (`WebContext`)
//! - Provide a concrete implementation over an HTTP request (`HttpWebContext`)
//!
//! # Design Decisions
//! - Per-key lookups return the first value, or `""` when absent
//! - Header names are stored in canonical form (`X-Trace-Id`), and lookups
//!   canonicalize the key, so `getHeaderVar` ignores case
//! - Form values come from url-encoded bodies only; query values never leak
//!   into the form collection

use axum::http::{header, request::Parts, HeaderMap, Uri};
use url::form_urlencoded;

use crate::http::request::{RequestId, RequestIdExt};
use crate::http::values::MultiValues;

/// Content type whose body is parsed into form values.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Read access to one inbound request.
pub trait WebContext {
    fn request_id(&self) -> &str;

    fn method(&self) -> &str;

    /// Request target as received (path and query string).
    fn uri(&self) -> &str;

    fn host(&self) -> &str;

    fn header_vars(&self) -> &MultiValues;

    fn query_vars(&self) -> &MultiValues;

    fn form_vars(&self) -> &MultiValues;

    fn path_vars(&self) -> &MultiValues;

    fn path_var(&self, key: &str) -> String {
        first_or_empty(self.path_vars(), key)
    }

    fn query_var(&self, key: &str) -> String {
        first_or_empty(self.query_vars(), key)
    }

    fn header_var(&self, key: &str) -> String {
        first_or_empty(self.header_vars(), &canonical_header_name(key))
    }

    fn form_var(&self, key: &str) -> String {
        first_or_empty(self.form_vars(), key)
    }
}

fn first_or_empty(values: &MultiValues, key: &str) -> String {
    values.first(key).unwrap_or_default().to_string()
}

/// Canonical form of a header name: the first letter and every letter after
/// a hyphen upper-cased, the rest lower-cased (`content-type` → `Content-Type`).
/// Names containing bytes outside the HTTP token set are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// `WebContext` over a received HTTP request.
#[derive(Debug, Clone)]
pub struct HttpWebContext {
    request_id: RequestId,
    method: String,
    uri: String,
    host: String,
    headers: MultiValues,
    queries: MultiValues,
    forms: MultiValues,
    path_vars: MultiValues,
}

impl HttpWebContext {
    /// Build from request parts, the (possibly empty) body and the matched
    /// path parameters.
    pub fn from_parts<I, K, V>(parts: &Parts, body: &[u8], path_vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let forms = if is_form_urlencoded(&parts.headers) {
            parse_urlencoded(body)
        } else {
            MultiValues::new()
        };

        Self {
            request_id: parts.headers.request_id_or_new(),
            method: parts.method.as_str().to_string(),
            uri: request_target(&parts.uri),
            host: request_host(&parts.headers, &parts.uri),
            headers: header_values(&parts.headers),
            queries: parts
                .uri
                .query()
                .map(|q| parse_urlencoded(q.as_bytes()))
                .unwrap_or_default(),
            forms,
            path_vars: path_vars.into_iter().collect(),
        }
    }
}

impl WebContext for HttpWebContext {
    fn request_id(&self) -> &str {
        self.request_id.as_str()
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn header_vars(&self) -> &MultiValues {
        &self.headers
    }

    fn query_vars(&self) -> &MultiValues {
        &self.queries
    }

    fn form_vars(&self) -> &MultiValues {
        &self.forms
    }

    fn path_vars(&self) -> &MultiValues {
        &self.path_vars
    }
}

/// True when the request declares a url-encoded form body.
pub fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}

fn parse_urlencoded(input: &[u8]) -> MultiValues {
    form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn request_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_default()
}

// Non-UTF-8 header values are kept lossily rather than dropped.
fn header_values(headers: &HeaderMap) -> MultiValues {
    headers
        .iter()
        .map(|(name, value)| {
            (
                canonical_header_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn test_scalars_copied_from_request() {
        let p = parts(
            Request::builder()
                .method("PUT")
                .uri("/users/7?verbose=1")
                .header("Host", "api.example.com")
                .header("X-Request-Id", "abc-123")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&p, b"", [("id", "7")]);

        assert_eq!(webc.method(), "PUT");
        assert_eq!(webc.uri(), "/users/7?verbose=1");
        assert_eq!(webc.host(), "api.example.com");
        assert_eq!(webc.request_id(), "abc-123");
        assert_eq!(webc.path_var("id"), "7");
    }

    #[test]
    fn test_host_falls_back_to_authority() {
        let p = parts(
            Request::builder()
                .uri("http://backend.local:9000/ping")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&p, b"", Vec::<(String, String)>::new());

        assert_eq!(webc.host(), "backend.local:9000");
        assert_eq!(webc.uri(), "/ping");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let p = parts(
            Request::builder()
                .uri("/")
                .header("X-Token", "first")
                .header("x-token", "second")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&p, b"", Vec::<(String, String)>::new());

        assert_eq!(webc.header_var("X-TOKEN"), "first");
        assert_eq!(webc.header_var("x-token"), "first");
        assert_eq!(webc.header_vars().get_all("X-Token"), vec!["first", "second"]);
        assert!(!webc.header_vars().contains_key("x-token"));
        assert_eq!(webc.header_var("missing"), "");
    }

    #[test]
    fn test_header_collection_uses_canonical_names() {
        let p = parts(
            Request::builder()
                .uri("/")
                .header("x-trace-id", "t-1")
                .header("CONTENT-TYPE", "text/plain")
                .header("www-authenticate", "Basic")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&p, b"", Vec::<(String, String)>::new());

        assert_eq!(
            webc.header_vars().keys(),
            vec!["X-Trace-Id", "Content-Type", "Www-Authenticate"]
        );
    }

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("X-REQUEST-ID"), "X-Request-Id");
        assert_eq!(canonical_header_name("host"), "Host");
        assert_eq!(canonical_header_name(""), "");
        assert_eq!(canonical_header_name("bad header"), "bad header");
    }

    #[test]
    fn test_form_parsed_only_for_urlencoded_body() {
        let form = parts(
            Request::builder()
                .method("POST")
                .uri("/submit?src=q")
                .header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&form, b"name=ada+lovelace&tag=a&tag=b", Vec::<(String, String)>::new());
        assert_eq!(webc.form_var("name"), "ada lovelace");
        assert_eq!(webc.form_vars().get_all("tag"), vec!["a", "b"]);
        assert_eq!(webc.form_var("src"), "");
        assert_eq!(webc.query_var("src"), "q");

        let json = parts(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header("Content-Type", "application/json")
                .body(())
                .unwrap(),
        );
        let webc = HttpWebContext::from_parts(&json, b"name=ignored", Vec::<(String, String)>::new());
        assert!(webc.form_vars().is_empty());
    }

    #[test]
    fn test_missing_request_id_is_generated() {
        let p = parts(Request::builder().uri("/").body(()).unwrap());
        let webc = HttpWebContext::from_parts(&p, b"", Vec::<(String, String)>::new());
        assert!(!webc.request_id().is_empty());
    }
}
