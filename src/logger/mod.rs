//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Startup banner and shutdown notice
//! - One access line per completed request
//! - Error and warning logging
//! - Optional file-based sinks

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AccessLogFormat, Config};
use std::net::SocketAddr;
use std::path::Path;

const RULE: &str = "==================================================";

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Until then every line
/// goes to stdout/stderr directly.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, base_dir: &Path) {
    write_info(RULE);
    write_info("Static file server");
    write_info(RULE);
    write_info(&format!("Serving at: http://localhost:{}", addr.port()));
    write_info(&format!("Listening on: {addr}"));
    write_info(&format!("Directory: {}", base_dir.display()));
    write_info(RULE);
    write_info("Press Ctrl+C to stop");
    write_info(RULE);
}

pub fn log_shutdown() {
    write_info("\n\nShutting down server...");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access line
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    write_access(&entry.format(format));
}
