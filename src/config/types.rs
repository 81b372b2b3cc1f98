// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory to serve; the executable's directory when unset
    #[serde(default)]
    pub root: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access line format (`request_line` or `common`)
    pub access_log_format: AccessLogFormat,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Access log line layout
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessLogFormat {
    /// `[time] METHOD target HTTP/x.y`
    #[default]
    RequestLine,
    /// `[time] "METHOD target HTTP/x.y" status bytes`
    Common,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub cors_origin: String,
    pub server_name: String,
    pub index_files: Vec<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound on a single connection's lifetime, in seconds
    pub connection_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 9999,
                root: None,
            },
            logging: LoggingConfig {
                access_log: true,
                access_log_format: AccessLogFormat::RequestLine,
                access_log_file: None,
                error_log_file: None,
            },
            http: HttpConfig {
                cors_origin: "*".to_string(),
                server_name: "static-cors-server/0.1".to_string(),
                index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            },
            performance: PerformanceConfig {
                keep_alive: true,
                connection_timeout: 30,
            },
        }
    }
}
