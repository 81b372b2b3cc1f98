//! HTTP protocol layer module
//!
//! Status-specific response builders, content types and cache validators,
//! independent of how paths are resolved.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_301_response, build_304_response, build_404_response, build_500_response,
    build_501_response, build_file_response, build_html_response, HttpResponse,
};
