//! Request dispatch module
//!
//! Entry point for HTTP request processing: method check, static file
//! dispatch, error-to-status mapping, then the header and log hooks.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use hyper::body::Body;
use hyper::{Method, Request};
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URI path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body, which is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<HttpResponse, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());

    let mut entry = AccessLogEntry::new(method, target, req.version());
    entry.remote_addr = remote_addr.map(|addr| addr.to_string());

    let mut response = match *method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: uri.path(),
                query: uri.query(),
                is_head: *method == Method::HEAD,
                if_modified_since: req
                    .headers()
                    .get("if-modified-since")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
                has_if_none_match: req.headers().contains_key("if-none-match"),
            };
            dispatch(&ctx, &state).await
        }
        _ => http::build_501_response(method.as_str()),
    };

    state.hooks.apply_headers(response.headers_mut());

    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
    state.hooks.log(&entry);

    Ok(response)
}

/// Serve from disk and map failures onto 404 / 500
async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> HttpResponse {
    match static_files::serve_path(ctx, state).await {
        Ok(response) => response,
        Err(e) if is_not_found(&e) => http::build_404_response(ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to serve '{}': {e}", ctx.path));
            http::build_500_response(ctx.is_head)
        }
    }
}

/// Errors the client sees as a missing resource
fn is_not_found(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied | io::ErrorKind::NotADirectory
    )
}
