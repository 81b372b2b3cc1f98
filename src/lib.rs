//! Static file server that serves one directory over HTTP/1, adds
//! `Access-Control-Allow-Origin` to every response and prints one access
//! line per request.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

#[cfg(test)]
mod testutil;
