//! HTTP response building module
//!
//! Builders for each status the file server produces. Cross-cutting
//! headers (CORS, `Server`) are not set here; the request hooks add them.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub type HttpResponse = Response<Full<Bytes>>;

/// Build a body-bearing response, emptying the body for HEAD
fn build_with_body(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    is_head: bool,
) -> HttpResponse {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback(status, &e))
}

fn build_text(status: StatusCode, message: String, is_head: bool) -> HttpResponse {
    build_with_body(
        status,
        "text/plain; charset=utf-8",
        Bytes::from(message),
        is_head,
    )
}

/// Build 200 response for a file
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> HttpResponse {
    let mut response = build_with_body(StatusCode::OK, content_type, data, is_head);
    if let Some(value) = last_modified.and_then(|v| v.parse().ok()) {
        response.headers_mut().insert("Last-Modified", value);
    }
    response
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> HttpResponse {
    build_with_body(
        StatusCode::OK,
        "text/html; charset=utf-8",
        Bytes::from(content),
        is_head,
    )
}

/// Build 301 redirect to the slash-terminated directory URL
pub fn build_301_response(location: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback(StatusCode::MOVED_PERMANENTLY, &e))
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("Last-Modified", last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback(StatusCode::NOT_MODIFIED, &e))
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> HttpResponse {
    build_text(StatusCode::NOT_FOUND, "404 Not Found".to_string(), is_head)
}

/// Build 500 Internal Server Error response
pub fn build_500_response(is_head: bool) -> HttpResponse {
    build_text(
        StatusCode::INTERNAL_SERVER_ERROR,
        "500 Internal Server Error".to_string(),
        is_head,
    )
}

/// Build 501 response for methods other than GET/HEAD
pub fn build_501_response(method: &str) -> HttpResponse {
    build_text(
        StatusCode::NOT_IMPLEMENTED,
        format!("Unsupported method ('{method}')"),
        false,
    )
}

/// Bare response used when the builder rejects a header value
fn fallback(status: StatusCode, error: &hyper::http::Error) -> HttpResponse {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_keeps_length_drops_body() {
        use hyper::body::Body;

        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain", None, true);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_last_modified_header() {
        let resp = build_file_response(
            Bytes::from_static(b"x"),
            "text/plain",
            Some("Tue, 15 Nov 1994 08:12:31 GMT"),
            false,
        );
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Tue, 15 Nov 1994 08:12:31 GMT"
        );
    }

    #[test]
    fn test_501_message() {
        let resp = build_501_response("POST");
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(resp.headers()["Content-Length"], "27");
    }

    #[test]
    fn test_301_location() {
        let resp = build_301_response("/docs/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["Location"], "/docs/");
    }
}
