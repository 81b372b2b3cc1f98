// Application state module
// Read-only serving context shared by every connection

use std::path::PathBuf;

use super::types::Config;
use crate::error::ServerError;
use crate::handler::RequestHooks;

/// Application state
///
/// Built once at startup and never mutated; connections hold it behind an `Arc`.
pub struct AppState {
    pub config: Config,
    /// Canonical root every request path is resolved against
    pub base_dir: PathBuf,
    pub hooks: RequestHooks,
}

impl AppState {
    /// Resolve the base directory from configuration and install the default hooks
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let base_dir = config.resolve_base_dir()?;
        let hooks = RequestHooks::from_config(&config);
        Ok(Self {
            config,
            base_dir,
            hooks,
        })
    }

    /// Build state with caller-supplied hooks
    pub fn with_hooks(config: Config, base_dir: PathBuf, hooks: RequestHooks) -> Self {
        Self {
            config,
            base_dir,
            hooks,
        }
    }
}
