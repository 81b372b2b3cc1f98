//! Request handler module
//!
//! Resolves requests against the base directory and serves files, index
//! documents and directory listings. Response decoration and access
//! logging are supplied through [`RequestHooks`].

pub mod hooks;
pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use hooks::RequestHooks;
pub use router::handle_request;
