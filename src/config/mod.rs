// Configuration module entry point
// Loads configuration and resolves the serving environment

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    AccessLogFormat, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Default config file stem, resolved by the `config` crate (`config.toml`, `config.yaml`, ...)
const DEFAULT_CONFIG_FILE: &str = "config";

impl Config {
    /// Load configuration from `config.*` in the working directory, if present
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Layering, lowest to highest: built-in defaults, the optional file,
    /// `STATIC_`-prefixed environment variables (`STATIC_SERVER__PORT=8080`).
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9999)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "request_line")?
            .set_default("http.cors_origin", "*")?
            .set_default("http.server_name", "static-cors-server/0.1")?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("STATIC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }

    /// Resolve the directory to serve as an absolute, canonical path
    ///
    /// Falls back to the directory holding the running executable when
    /// `server.root` is not configured.
    pub fn resolve_base_dir(&self) -> Result<PathBuf, ServerError> {
        let candidate = match self.server.root.as_deref() {
            Some(root) => PathBuf::from(root),
            None => executable_dir()?,
        };

        let canonical = candidate
            .canonicalize()
            .map_err(|source| ServerError::BaseDir {
                path: candidate.clone(),
                source,
            })?;

        if !canonical.is_dir() {
            return Err(ServerError::BaseDir {
                path: candidate,
                source: std::io::Error::other("not a directory"),
            });
        }

        Ok(canonical)
    }
}

fn executable_dir() -> Result<PathBuf, ServerError> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestDir;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.root, None);
        assert_eq!(cfg.http.cors_origin, "*");
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::RequestLine);
        assert!(cfg.performance.keep_alive);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TestDir::new("config-file");
        dir.write(
            "server.toml",
            b"[server]\nport = 8081\nroot = \"/srv/www\"\n\n[logging]\naccess_log_format = \"common\"\n",
        );
        let stem = dir.path().join("server");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.server.root.as_deref(), Some("/srv/www"));
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::Common);
        // Untouched keys keep their defaults
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TestDir::new("config-invalid");
        dir.write("server.toml", b"[server]\nport = \"not a port\"\n");
        let stem = dir.path().join("server");
        let err = Config::load_from(stem.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)), "{err}");
        assert!(err.to_string().starts_with("configuration error: "));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9999);

        let mut bad = Config::default();
        bad.server.host = "not a host".to_string();
        assert!(matches!(
            bad.get_socket_addr(),
            Err(ServerError::Address { .. })
        ));
    }

    #[test]
    fn test_resolve_base_dir() {
        let dir = TestDir::new("base-dir");
        let mut cfg = Config::default();
        cfg.server.root = Some(dir.path().to_string_lossy().into_owned());
        let base = cfg.resolve_base_dir().unwrap();
        assert!(base.is_absolute());
        assert_eq!(base, dir.path().canonicalize().unwrap());

        cfg.server.root = Some(dir.path().join("nope").to_string_lossy().into_owned());
        assert!(matches!(
            cfg.resolve_base_dir(),
            Err(ServerError::BaseDir { .. })
        ));
    }

    #[test]
    fn test_base_dir_defaults_to_executable_dir() {
        let cfg = Config::default();
        let base = cfg.resolve_base_dir().unwrap();
        let exe = std::env::current_exe().unwrap().canonicalize().unwrap();
        assert!(exe.starts_with(&base));
    }
}
