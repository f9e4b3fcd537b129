//! Issue reference linking
//!
//! Turns `<prefix><digits>` into `<a href="<base><digits>"><prefix><digits></a>`.
//!
//! [`ReferenceLinker::link_markup`] works on serialized markup and so also
//! rewrites matches that sit inside attribute values.
//! [`ReferenceLinker::link_text_nodes`] only touches text nodes of a tree
//! and skips text that is already inside a link.

use std::borrow::Cow;

use regex::{Captures, Regex};
use scrub_dom::{DomTree, Node, NodeId};

use crate::error::ConfigError;

/// Path issue links point at; the number is appended
pub const DEFAULT_ISSUE_PATH: &str = "/issue/";

/// Rewrites issue references into links
#[derive(Debug, Clone)]
pub struct ReferenceLinker {
    prefix: String,
    base_path: String,
    pattern: Regex,
}

impl ReferenceLinker {
    /// Linker for `prefix` pointing at [`DEFAULT_ISSUE_PATH`]
    pub fn new(prefix: &str) -> Result<Self, ConfigError> {
        Self::with_base_path(prefix, DEFAULT_ISSUE_PATH)
    }

    /// Linker for `prefix` pointing at `base_path`. The prefix is matched
    /// literally and case-sensitively.
    pub fn with_base_path(prefix: &str, base_path: &str) -> Result<Self, ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::InvalidPrefix(prefix.to_string()));
        }
        let path_safe = base_path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.' | '_' | '~'));
        if !base_path.starts_with('/') || !path_safe {
            return Err(ConfigError::InvalidPath(base_path.to_string()));
        }

        let pattern = Regex::new(&format!("{}([0-9]+)", regex::escape(prefix)))?;
        Ok(Self {
            prefix: prefix.to_string(),
            base_path: base_path.to_string(),
            pattern,
        })
    }

    fn href(&self, number: &str) -> String {
        format!("{}{}", self.base_path, number)
    }

    /// Replace every reference in serialized markup. Markup without a match
    /// is borrowed back unchanged.
    pub fn link_markup<'a>(&self, html: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(html, |caps: &Captures| {
            format!(r#"<a href="{}">{}</a>"#, self.href(&caps[1]), &caps[0])
        })
    }

    /// Replace references inside text nodes below the root with anchor
    /// elements. Returns the number of links created.
    pub fn link_text_nodes(&self, tree: &mut DomTree) -> usize {
        let targets: Vec<NodeId> = tree
            .descendants(tree.root())
            .filter(|&id| tree.get(id).is_some_and(Node::is_text) && !inside_link(tree, id))
            .collect();

        let mut created = 0;
        for id in targets {
            created += self.link_text_node(tree, id);
        }

        tracing::debug!(links = created, prefix = %self.prefix, "linked references");
        created
    }

    fn link_text_node(&self, tree: &mut DomTree, id: NodeId) -> usize {
        let Some(node) = tree.get(id) else {
            return 0;
        };
        let parent = node.parent;
        let Some(text) = node.as_text().map(str::to_owned) else {
            return 0;
        };
        if !parent.is_valid() || !self.pattern.is_match(&text) {
            return 0;
        }

        let mut replacement = Vec::new();
        let mut last = 0;
        for found in self.pattern.captures_iter(&text) {
            let (Some(whole), Some(number)) = (found.get(0), found.get(1)) else {
                continue;
            };
            if whole.start() > last {
                replacement.push(tree.create_text(&text[last..whole.start()]));
            }

            let anchor = tree.create_element("a");
            if let Some(elem) = tree.get_mut(anchor).and_then(Node::as_element_mut) {
                elem.set_attr("href", self.href(number.as_str()));
            }
            let label = tree.create_text(whole.as_str());
            tree.append_child(anchor, label);
            replacement.push(anchor);
            last = whole.end();
        }
        if last < text.len() {
            replacement.push(tree.create_text(&text[last..]));
        }

        let created = replacement
            .iter()
            .filter(|&&n| tree.get(n).is_some_and(Node::is_element))
            .count();

        let mut siblings = tree.children(parent).to_vec();
        if let Some(pos) = siblings.iter().position(|&c| c == id) {
            siblings.splice(pos..=pos, replacement);
            tree.set_children(parent, siblings);
        }
        created
    }
}

fn inside_link(tree: &DomTree, id: NodeId) -> bool {
    let mut current = tree.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
    while let Some(node) = tree.get(current) {
        if node.as_element().is_some_and(|e| e.local_name == "a") {
            return true;
        }
        current = node.parent;
    }
    false
}
