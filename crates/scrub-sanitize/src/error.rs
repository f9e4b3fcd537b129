//! Configuration errors
//!
//! Sanitizing itself never fails; only loading or applying settings can.

use std::path::PathBuf;

/// Errors raised while loading a [`SanitizeConfig`](crate::SanitizeConfig)
/// or building a linker from it
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid issue prefix {0:?}: must not be empty")]
    InvalidPrefix(String),

    #[error("Issue prefix does not compile to a pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid issue path {0:?}: must start with '/' and use only letters, digits and -._~/")]
    InvalidPath(String),
}
