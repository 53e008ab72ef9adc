//! Request dispatch module
//!
//! Entry point for HTTP request processing: size check, target parsing,
//! routing and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read; only the head matters for routing.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    drop(body);

    let response = match check_body_size(&parts, &state) {
        Some(resp) => resp,
        None => route(&parts, &state).await,
    };

    if state.cached_access_log.load(Ordering::Relaxed) {
        log_access(&parts, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Run the router on the blocking pool, since executors may block
async fn route(parts: &Parts, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();
    let is_head = parts.method == Method::HEAD;

    let request = http::parse_request_target(&parts.uri);
    logger::log_request_parsed(&request);

    let router = Arc::clone(&state.router);
    match tokio::task::spawn_blocking(move || router.handle(&request)).await {
        Ok(resp) => http::build_router_response(resp, server_name, is_head),
        Err(e) => {
            logger::log_error(&format!("Routing task failed: {e}"));
            http::build_500_response(server_name)
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, state: &AppState) -> Option<Response<Full<Bytes>>> {
    let max_body_size = state.config.http.max_body_size;
    let content_length = parts.headers.get("content-length")?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response(&state.config.http.server_name))
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
