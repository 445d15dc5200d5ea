//! CLI error types.

use confpub_config::ConfigError;
use confpub_confluence::{ConfluenceError, SyncError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Validation(String),
}
