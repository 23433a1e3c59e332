//! CLI error types.

use pagesmith_config::ConfigError;
use pagesmith_content::GenerateError;
use pagesmith_nav::NavigationError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("invalid page list: {0}")]
    Json(#[from] serde_json::Error),
}
