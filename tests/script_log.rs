//! Script `log` binding and lookup diagnostics as seen by a log subscriber.

use axum::http::Request;
use serde_json::json;

use script_gateway::http::HttpWebContext;
use script_gateway::script::{ScriptContext, ScriptValue};

mod common;

fn web_context(request_id: &str) -> HttpWebContext {
    let (parts, _) = Request::builder()
        .uri("/users/7?tab=profile")
        .header("x-request-id", request_id)
        .body(())
        .unwrap()
        .into_parts();
    HttpWebContext::from_parts(&parts, b"", [("id", "7")])
}

#[test]
fn test_log_is_tagged_with_request_id() {
    let logs = common::CapturedLogs::default();
    let web = web_context("req-77");
    let ctx = ScriptContext::new(&web, "/users/{id}");

    tracing::subscriber::with_default(logs.subscriber(), || {
        ctx.log("hello from script");
    });

    let output = logs.contents();
    assert!(output.contains(" INFO "), "{output}");
    assert!(output.contains("script: hello from script"), "{output}");
    assert!(output.contains("request_id=req-77"), "{output}");
    assert!(output.contains("pattern=/users/{id}"), "{output}");
}

#[test]
fn test_log_accepts_structured_values() {
    let logs = common::CapturedLogs::default();
    let web = web_context("req-78");
    let mut ctx = ScriptContext::new(&web, "/users/{id}");

    tracing::subscriber::with_default(logs.subscriber(), || {
        ctx.log(42i64);
        ctx.log(true);
        ctx.call("log", &[ScriptValue::from(json!({"user": "7", "tab": "profile"}))])
            .unwrap();
    });

    let output = logs.contents();
    assert!(output.contains("script: 42 "), "{output}");
    assert!(output.contains("script: true "), "{output}");
    assert!(output.contains(r#"script: {"tab":"profile","user":"7"}"#), "{output}");
}

#[test]
fn test_logs_from_two_requests_stay_apart() {
    let logs = common::CapturedLogs::default();
    let first = web_context("req-a");
    let second = web_context("req-b");
    let a = ScriptContext::new(&first, "/users/{id}");
    let b = ScriptContext::new(&second, "/users/{id}");

    tracing::subscriber::with_default(logs.subscriber(), || {
        a.log("from a");
        b.log("from b");
    });

    let output = logs.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2, "{output}");
    assert!(lines[0].contains("from a") && lines[0].contains("request_id=req-a"));
    assert!(lines[1].contains("from b") && lines[1].contains("request_id=req-b"));
}

#[test]
fn test_bad_expression_logged_at_debug() {
    let logs = common::CapturedLogs::default();
    let web = web_context("req-79");
    let ctx = ScriptContext::new(&web, "/users/{id}");

    let value = tracing::subscriber::with_default(logs.subscriber(), || ctx.lookup_expr("cookie:sid"));

    assert_eq!(value, "");
    let output = logs.contents();
    assert!(output.contains("DEBUG"), "{output}");
    assert!(output.contains("Unresolvable lookup expression"), "{output}");
    assert!(output.contains("request_id=req-79"), "{output}");
}

#[test]
fn test_lookups_against_http_request() {
    let web = web_context("req-80");
    let ctx = ScriptContext::new(&web, "/users/{id}");

    assert_eq!(ctx.get_path_var("id"), "7");
    assert_eq!(ctx.get_query_var("tab"), "profile");
    assert_eq!(ctx.get_header_var("X-Request-Id"), "req-80");
    assert_eq!(ctx.lookup_expr("param:tab"), "profile");
    assert_eq!(ctx.lookup_expr("request:path"), "/users/7");
    assert_eq!(ctx.lookup_expr("request:id"), "req-80");
}
