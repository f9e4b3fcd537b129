//! End-to-end rendering
//!
//! raw markup -> strip comments -> parse + filter -> serialize -> link

use scrub_dom::{DomTree, NodeId};
use scrub_html::serialize_children;
use serde::Deserialize;

use crate::comment::CommentStripper;
use crate::config::SanitizeConfig;
use crate::error::ConfigError;
use crate::linker::ReferenceLinker;
use crate::sanitizer::TreeSanitizer;

/// Where issue references get linked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
    /// Regex pass over the serialized markup
    #[default]
    Markup,
    /// Only inside text nodes of the sanitized tree
    TextNodes,
    /// No linking
    Disabled,
}

/// Configured sanitizer + linker
#[derive(Debug, Clone)]
pub struct Pipeline {
    stripper: CommentStripper,
    sanitizer: TreeSanitizer,
    linker: ReferenceLinker,
    link_mode: LinkMode,
}

impl Pipeline {
    pub fn new(config: &SanitizeConfig) -> Result<Self, ConfigError> {
        let sanitizer = TreeSanitizer::new(config.whitelist())
            .with_text_policy(config.text)
            .with_url_policy(config.url_policy());
        let linker = ReferenceLinker::with_base_path(&config.issue_prefix, &config.issue_path)?;

        Ok(Self {
            stripper: CommentStripper::new(),
            sanitizer,
            linker,
            link_mode: config.link_mode,
        })
    }

    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    /// Sanitize and link raw markup
    pub fn render(&self, html: &str) -> String {
        let stripped = self.stripper.strip(html);
        let tree = self.sanitizer.sanitize_str(&stripped);
        self.finish(tree)
    }

    /// Sanitize and link an already parsed node. The source tree is consumed.
    pub fn render_node(&self, source: DomTree, node: NodeId) -> String {
        let tree = self.sanitizer.sanitize_node(source, node);
        self.finish(tree)
    }

    fn finish(&self, mut tree: DomTree) -> String {
        match self.link_mode {
            LinkMode::Markup => {
                let html = serialize_children(&tree, tree.root());
                self.linker.link_markup(&html).into_owned()
            }
            LinkMode::TextNodes => {
                self.linker.link_text_nodes(&mut tree);
                serialize_children(&tree, tree.root())
            }
            LinkMode::Disabled => serialize_children(&tree, tree.root()),
        }
    }
}
