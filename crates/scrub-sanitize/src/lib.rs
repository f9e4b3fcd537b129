//! scrub sanitizer
//!
//! Makes author-supplied HTML (usually rendered markdown) safe to insert
//! into a page, then links issue references.
//!
//! Stages:
//! - [`CommentStripper`] removes comment regions from the raw string
//! - [`TreeSanitizer`] parses and cuts out every non-whitelisted subtree
//!   and attribute
//! - [`ReferenceLinker`] turns `KB-42` style tokens into links
//!
//! Attribute *values* are not validated unless a [`UrlPolicy`] is set:
//! a whitelisted `href` may still carry a `javascript:` URL.

mod comment;
mod config;
mod error;
mod linker;
mod pipeline;
mod sanitizer;
mod whitelist;

pub use comment::{strip_comments, CommentStripper};
pub use config::{SanitizeConfig, DEFAULT_ISSUE_PREFIX};
pub use error::ConfigError;
pub use linker::{ReferenceLinker, DEFAULT_ISSUE_PATH};
pub use pipeline::{LinkMode, Pipeline};
pub use sanitizer::{SanitizeReport, TextPolicy, TreeSanitizer, UrlPolicy, DEFAULT_ROOT_TAG};
pub use whitelist::{Whitelist, DEFAULT_ATTRIBUTES, DEFAULT_TAGS};

/// Strip comments, filter with the default whitelist and serialize.
/// No reference linking.
pub fn clean(html: &str) -> String {
    let tree = TreeSanitizer::default().sanitize_str(&strip_comments(html));
    scrub_html::serialize_children(&tree, tree.root())
}

/// Full pipeline with the default whitelist, linking `prefix` references
pub fn render(html: &str, prefix: &str) -> Result<String, ConfigError> {
    let config = SanitizeConfig {
        issue_prefix: prefix.to_string(),
        ..Default::default()
    };
    Ok(Pipeline::new(&config)?.render(html))
}
