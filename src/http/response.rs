//! HTTP response building module
//!
//! Converts router responses into hyper responses and builds the few
//! responses produced outside the router.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::routing;

/// Convert a router response into a hyper response
///
/// Adds `Server` and `Content-Length`. For HEAD requests the body is
/// dropped but `Content-Length` still reports its size.
pub fn build_router_response(
    resp: routing::Response,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = resp.body.len();
    let mut builder = Response::builder()
        .status(resp.status)
        .header("Server", server_name)
        .header("Content-Length", content_length);
    for (name, value) in &resp.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(resp.body)
    };

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(&resp.status.to_string(), &e);
        build_500_response(server_name)
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response(server_name: &str) -> Response<Full<Bytes>> {
    build_plain_response(413, "413 Payload Too Large", server_name)
}

/// Build 500 Internal Server Error response
pub fn build_500_response(server_name: &str) -> Response<Full<Bytes>> {
    build_plain_response(500, "Internal Server Error", server_name)
}

fn build_plain_response(status: u16, body: &'static str, server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Server", server_name)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from_static(body.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_router_response_conversion() {
        let resp = build_router_response(
            routing::Response::new(200, "text/html", "hi there"),
            "test-server",
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.headers()["server"], "test-server");
        assert_eq!(resp.headers()["content-length"], "8");
        assert_eq!(body_string(resp).await, "hi there");
    }

    #[tokio::test]
    async fn test_head_drops_body() {
        let resp = build_router_response(
            routing::Response::new(404, "text/plain", "Not Found."),
            "test-server",
            true,
        );
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-length"], "10");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_error_responses() {
        let resp = build_413_response("s");
        assert_eq!(resp.status(), 413);
        assert_eq!(body_string(resp).await, "413 Payload Too Large");

        let resp = build_500_response("s");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["content-type"], "text/plain");
    }
}
