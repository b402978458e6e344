//! CLI error types.

use trellis_config::ConfigError;
use trellis_site::{RegistryError, RenderError};
use trellis_storage::StorageError;

use crate::content::ContentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
