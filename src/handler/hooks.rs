//! Request hooks
//!
//! The handler stays generic; everything deployment-specific about a
//! response (extra headers, the access line) is plugged in here.

use hyper::header::{HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};

use crate::config::Config;
use crate::logger::{self, AccessLogEntry};

/// Runs on every response's header block just before it is sent
pub type HeaderHook = Box<dyn Fn(&mut HeaderMap) + Send + Sync>;

/// Runs once per completed request
pub type LogHook = Box<dyn Fn(&AccessLogEntry) + Send + Sync>;

pub struct RequestHooks {
    header: HeaderHook,
    log: LogHook,
}

impl RequestHooks {
    pub fn new(header: HeaderHook, log: LogHook) -> Self {
        Self { header, log }
    }

    /// CORS and `Server` headers plus the configured access line
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            header_injector(&config.http.cors_origin, &config.http.server_name),
            access_logger(config),
        )
    }

    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        (self.header)(headers);
    }

    pub fn log(&self, entry: &AccessLogEntry) {
        (self.log)(entry);
    }
}

/// Header hook setting `Access-Control-Allow-Origin` and `Server`
///
/// An origin that is not a valid header value falls back to `*`.
pub fn header_injector(cors_origin: &str, server_name: &str) -> HeaderHook {
    let origin = HeaderValue::from_str(cors_origin).unwrap_or_else(|_| {
        logger::log_warning(&format!(
            "Invalid CORS origin '{cors_origin}', using '*'"
        ));
        HeaderValue::from_static("*")
    });
    let server = HeaderValue::from_str(server_name).ok();

    Box::new(move |headers: &mut HeaderMap| {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        if let Some(server) = &server {
            headers.insert(SERVER, server.clone());
        }
    })
}

/// Log hook printing one access line, or nothing when access logging is off
pub fn access_logger(config: &Config) -> LogHook {
    if !config.logging.access_log {
        return Box::new(|_: &AccessLogEntry| {});
    }
    let format = config.logging.access_log_format;
    Box::new(move |entry: &AccessLogEntry| logger::log_access(entry, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, Version};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_header_injector_overwrites() {
        let hook = header_injector("*", "test-server");
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://a.example"));
        hook(&mut headers);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[SERVER], "test-server");
        assert_eq!(headers.get_all(ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(), 1);
    }

    #[test]
    fn test_invalid_origin_falls_back() {
        let hook = header_injector("bad\norigin", "test-server");
        let mut headers = HeaderMap::new();
        hook(&mut headers);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_custom_log_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hooks = RequestHooks::new(
            Box::new(|_: &mut HeaderMap| {}),
            Box::new(move |entry: &AccessLogEntry| sink.lock().unwrap().push(entry.request_line())),
        );

        hooks.log(&AccessLogEntry::new(&Method::GET, "/a", Version::HTTP_11));
        hooks.log(&AccessLogEntry::new(&Method::HEAD, "/b", Version::HTTP_10));

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["GET /a HTTP/1.1".to_string(), "HEAD /b HTTP/1.0".to_string()]
        );
    }
}
