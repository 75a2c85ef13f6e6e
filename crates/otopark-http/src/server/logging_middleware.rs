//! HTTP Request/Response Logging Middleware
//!
//! Centralized logging with trace IDs for request correlation.
//! Uses TraceContext for consistent, non-repetitive logging.

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use http_body_util::BodyExt;
use tracing::{debug, warn, Instrument};

use crate::logging::{RequestSpan, TraceContext};

/// Maximum body size to log (1MB)
const MAX_BODY_LOG_SIZE: usize = 1024 * 1024;

/// Headers that should be redacted
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "x-api-key"];

/// Redact sensitive headers (compact format for DEBUG)
fn redact_headers_compact(headers: &axum::http::HeaderMap) -> String {
    headers
        .iter()
        .filter(|(name, _)| {
            let n = name.as_str().to_lowercase();
            SENSITIVE_HEADERS.contains(&n.as_str())
                || matches!(n.as_str(), "accept" | "user-agent" | "origin")
        })
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                format!("{}=[REDACTED]", name)
            } else {
                format!("{}={:?}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format bytes as string - compact version
pub fn format_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[empty]".to_string();
    }

    if bytes.len() > MAX_BODY_LOG_SIZE {
        return format!("[{} bytes]", bytes.len());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            if let Some(summary) = format_facility_response(bytes) {
                return summary;
            }
            if text.chars().count() > 200 {
                let truncated: String = text.chars().take(200).collect();
                format!("{}...", truncated)
            } else {
                text.to_string()
            }
        }
        Err(_) => format!("[binary: {} bytes]", bytes.len()),
    }
}

/// Summarize a facility envelope instead of logging every record
pub fn format_facility_response(bytes: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(bytes).ok()?;

    if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
        return Some(format!("error: {}", error));
    }

    match json.get("success").and_then(|s| s.as_bool()) {
        Some(true) => {
            let count = json
                .get("data")
                .and_then(|d| d.as_array())
                .map(|d| d.len())
                .unwrap_or(0);
            Some(format!("data: {} records", count))
        }
        Some(false) => Some("no data".to_string()),
        None => None,
    }
}

/// Logging middleware for requests and responses
///
/// Generates a trace_id and logs a single entry/exit line per request.
pub async fn http_logging_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let headers = request.headers().clone();
    let origin = headers
        .get(axum::http::header::ORIGIN)
        .and_then(|o| o.to_str().ok())
        .map(String::from);

    let ctx = TraceContext::new(&method, &path).with_origin(origin);
    let span = RequestSpan::enter(&ctx);

    async move {
        RequestSpan::log_entry(&ctx);
        debug!(
            trace_id = %ctx.trace_id,
            headers = %redact_headers_compact(&headers),
            "Request headers"
        );

        let mut request = request;
        request.extensions_mut().insert(ctx.clone());

        let response = next.run(request).await;

        let (parts, body) = response.into_parts();
        let status = parts.status;

        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(trace_id = %ctx.trace_id, "Failed to read response body: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        let summary = format_facility_response(&body_bytes);
        if summary.is_none() && !body_bytes.is_empty() {
            debug!(
                trace_id = %ctx.trace_id,
                body = %format_body(&body_bytes),
                "Response body"
            );
        }

        RequestSpan::log_exit(&ctx, status.as_u16(), summary.as_deref());

        Ok(Response::from_parts(parts, Body::from(body_bytes)))
    }
    .instrument(span)
    .await
}
