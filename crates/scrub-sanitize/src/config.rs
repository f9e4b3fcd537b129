//! Sanitizer settings
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::linker::DEFAULT_ISSUE_PATH;
use crate::pipeline::LinkMode;
use crate::sanitizer::{TextPolicy, UrlPolicy};
use crate::whitelist::{Whitelist, DEFAULT_ATTRIBUTES, DEFAULT_TAGS};

/// Issue prefix used when none is configured
pub const DEFAULT_ISSUE_PREFIX: &str = "KB-";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizeConfig {
    /// Literal token in front of issue numbers
    pub issue_prefix: String,
    /// Path the issue number is appended to
    pub issue_path: String,
    /// Replaces the built-in tag whitelist
    pub tags: Option<Vec<String>>,
    /// Replaces the built-in attribute whitelist
    pub attributes: Option<Vec<String>>,
    pub text: TextPolicy,
    pub link_mode: LinkMode,
    /// Restrict `href`/`src` to these schemes. Unset means values are not checked.
    pub url_schemes: Option<Vec<String>>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            issue_prefix: DEFAULT_ISSUE_PREFIX.to_string(),
            issue_path: DEFAULT_ISSUE_PATH.to_string(),
            tags: None,
            attributes: None,
            text: TextPolicy::default(),
            link_mode: LinkMode::default(),
            url_schemes: None,
        }
    }
}

impl SanitizeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Whitelist with overrides applied field by field
    pub fn whitelist(&self) -> Whitelist {
        match (&self.tags, &self.attributes) {
            (None, None) => Whitelist::default(),
            (Some(tags), None) => Whitelist::new(tags, DEFAULT_ATTRIBUTES),
            (None, Some(attrs)) => Whitelist::new(DEFAULT_TAGS, attrs),
            (Some(tags), Some(attrs)) => Whitelist::new(tags, attrs),
        }
    }

    pub fn url_policy(&self) -> UrlPolicy {
        match &self.url_schemes {
            Some(schemes) => UrlPolicy::Schemes(schemes.clone()),
            None => UrlPolicy::Unchecked,
        }
    }
}
