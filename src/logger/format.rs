//! Access line format module
//!
//! Two layouts are supported:
//! - `request_line`: timestamp and request line only (the default)
//! - `common`: additionally carries client, status and body size

use chrono::{DateTime, Local};
use hyper::{Method, Version};

use crate::config::AccessLogFormat;

/// Timestamp layout, e.g. `18/Oct/2026 14:03:12`
const TIME_FORMAT: &str = "%d/%b/%Y %H:%M:%S";

/// One completed request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address, if known
    pub remote_addr: Option<String>,
    /// Server-local completion time
    pub time: DateTime<Local>,
    pub method: String,
    /// Request target as received (path and query)
    pub target: String,
    /// Protocol version, e.g. `HTTP/1.1`
    pub version: String,
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
}

impl AccessLogEntry {
    /// Create a new entry stamped with the current local time
    pub fn new(method: &Method, target: &str, version: Version) -> Self {
        Self {
            remote_addr: None,
            time: Local::now(),
            method: method.to_string(),
            target: target.to_string(),
            version: format!("{version:?}"),
            status: 200,
            body_bytes: 0,
        }
    }

    /// `METHOD target HTTP/x.y`
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.target, self.version)
    }

    pub fn format(&self, format: AccessLogFormat) -> String {
        match format {
            AccessLogFormat::RequestLine => self.format_request_line(),
            AccessLogFormat::Common => self.format_common(),
        }
    }

    fn format_request_line(&self) -> String {
        format!("[{}] {}", self.time.format(TIME_FORMAT), self.request_line())
    }

    /// `$remote_addr - - [$time] "$request" $status $body_bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr.as_deref().unwrap_or("-"),
            self.time.format(TIME_FORMAT),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }
}
