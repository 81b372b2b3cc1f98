//! Static file serving module
//!
//! Maps request paths onto the base directory and serves files, index
//! documents and directory listings.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, HttpResponse};
use crate::logger;
use hyper::body::Bytes;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Translate a URL path into a filesystem path under `base_dir`
///
/// The path is percent-decoded and normalized lexically: empty and `.`
/// segments are dropped and `..` pops the previous segment, never rising
/// above `base_dir`. Returns `None` when the path cannot name a file
/// (invalid UTF-8 after decoding, embedded NUL).
pub fn translate_path(base_dir: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\0') => return None,
            // A backslash is a separator on Windows
            s if cfg!(windows) && s.contains('\\') => {}
            s => segments.push(s),
        }
    }

    let mut path = base_dir.to_path_buf();
    path.extend(segments);
    Some(path)
}

/// Serve the request path from the base directory
///
/// Errors are I/O failures; the router decides between 404 and 500.
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> io::Result<HttpResponse> {
    let Some(fs_path) = translate_path(&state.base_dir, ctx.path) else {
        return Ok(http::build_404_response(ctx.is_head));
    };

    let metadata = fs::metadata(&fs_path).await?;
    ensure_within_base(&state.base_dir, &fs_path, ctx.path).await?;

    if metadata.is_dir() {
        if !ctx.path.ends_with('/') {
            return Ok(http::build_301_response(&directory_location(ctx)));
        }
        return serve_directory(ctx, state, &fs_path).await;
    }

    // A trailing slash names a directory; files never match it
    if ctx.path.ends_with('/') {
        return Ok(http::build_404_response(ctx.is_head));
    }

    serve_file(ctx, &fs_path, &metadata).await
}

/// Serve an index document if present, otherwise a listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> io::Result<HttpResponse> {
    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        if let Ok(index_meta) = fs::metadata(&index_path).await {
            if index_meta.is_file() {
                // Same containment rule as a direct request for the index
                ensure_within_base(&state.base_dir, &index_path, ctx.path).await?;
                return serve_file(ctx, &index_path, &index_meta).await;
            }
        }
    }

    let entries = listing::collect_entries(dir).await?;
    let display_path = urlencoding::decode(ctx.path)
        .map_or_else(|_| ctx.path.to_string(), std::borrow::Cow::into_owned);
    let html = listing::render_listing(&display_path, &entries);
    Ok(http::build_html_response(html, ctx.is_head))
}

/// Serve a regular file, honouring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    metadata: &Metadata,
) -> io::Result<HttpResponse> {
    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::http_date);

    // If-None-Match takes precedence; without ETags it can never match
    if !ctx.has_if_none_match {
        if let (Some(mtime), Some(lm)) = (modified, last_modified.as_deref()) {
            if cache::is_not_modified(ctx.if_modified_since.as_deref(), mtime) {
                return Ok(http::build_304_response(lm));
            }
        }
    }

    let content = fs::read(file_path).await?;
    let content_type = mime::content_type_for(file_path);

    Ok(http::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_deref(),
        ctx.is_head,
    ))
}

/// Reject paths that resolve (through symlinks) outside the base directory
async fn ensure_within_base(base_dir: &Path, fs_path: &Path, url_path: &str) -> io::Result<()> {
    let canonical = fs::canonicalize(fs_path).await?;
    if canonical.starts_with(base_dir) {
        return Ok(());
    }
    logger::log_warning(&format!(
        "Path traversal attempt blocked: {} -> {}",
        url_path,
        canonical.display()
    ));
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "path resolves outside the base directory",
    ))
}

/// `Location` for a directory requested without its trailing slash
fn directory_location(ctx: &RequestContext<'_>) -> String {
    match ctx.query {
        Some(query) => format!("{}/?{query}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/srv/site")
    }

    #[test]
    fn test_translate_plain() {
        assert_eq!(
            translate_path(&base(), "/css/site.css"),
            Some(PathBuf::from("/srv/site/css/site.css"))
        );
        assert_eq!(translate_path(&base(), "/"), Some(base()));
    }

    #[test]
    fn test_translate_decodes() {
        assert_eq!(
            translate_path(&base(), "/my%20file.txt"),
            Some(PathBuf::from("/srv/site/my file.txt"))
        );
    }

    #[test]
    fn test_translate_never_escapes() {
        assert_eq!(translate_path(&base(), "/../../etc/passwd"), Some(PathBuf::from("/srv/site/etc/passwd")));
        assert_eq!(translate_path(&base(), "/%2e%2e/%2E%2E/etc"), Some(PathBuf::from("/srv/site/etc")));
        assert_eq!(translate_path(&base(), "/a/./b/../c"), Some(PathBuf::from("/srv/site/a/c")));
        assert_eq!(translate_path(&base(), "/a/..%2f..%2fsecret"), Some(PathBuf::from("/srv/site/secret")));
    }

    #[test]
    fn test_translate_rejects_bad_input() {
        assert_eq!(translate_path(&base(), "/bad%00name"), None);
        assert_eq!(translate_path(&base(), "/%ff%fe"), None);
    }

    #[test]
    fn test_directory_location() {
        let ctx = RequestContext {
            path: "/docs",
            query: Some("lang=en"),
            is_head: false,
            if_modified_since: None,
            has_if_none_match: false,
        };
        assert_eq!(directory_location(&ctx), "/docs/?lang=en");

        let ctx = RequestContext { query: None, ..ctx };
        assert_eq!(directory_location(&ctx), "/docs/");
    }
}
