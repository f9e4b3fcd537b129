//! Whitelist tree filter
//!
//! Walks everything below the synthetic root. A node that is not an
//! allowed element is cut out together with its whole subtree; its
//! children are never inspected and never promoted. Allowed elements lose
//! every attribute outside the attribute whitelist before their own
//! children are filtered.

use scrub_dom::{Attribute, DomTree, NodeData, NodeId};
use scrub_html::HtmlParser;
use serde::Deserialize;

use crate::whitelist::Whitelist;

/// Tag of the synthetic container unless overridden
pub const DEFAULT_ROOT_TAG: &str = "div";

/// Attributes whose values are URLs
const URL_ATTRIBUTES: &[&str] = &["href", "src"];

/// What happens to text nodes under allowed elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Text survives wherever its parent does
    #[default]
    Keep,
    /// Text is treated like a disallowed node; output is elements only
    Drop,
}

/// Value-level check on `href`/`src`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    /// Values are kept verbatim, including `javascript:` URLs
    #[default]
    Unchecked,
    /// Absolute URLs must use one of these schemes; relative URLs pass
    Schemes(Vec<String>),
}

impl UrlPolicy {
    fn permits(&self, attr: &Attribute) -> bool {
        let UrlPolicy::Schemes(schemes) = self else {
            return true;
        };
        if !URL_ATTRIBUTES.contains(&attr.name.as_str()) {
            return true;
        }

        match url::Url::parse(attr.value.trim()) {
            Ok(parsed) => schemes
                .iter()
                .any(|scheme| scheme.eq_ignore_ascii_case(parsed.scheme())),
            Err(url::ParseError::RelativeUrlWithoutBase) => true,
            Err(_) => false,
        }
    }
}

/// Counts of what one pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Subtree roots cut out (their descendants are not counted)
    pub removed_nodes: usize,
    /// Attributes stripped from surviving elements
    pub removed_attributes: usize,
}

/// Whitelist filter over an arena tree
#[derive(Debug, Clone)]
pub struct TreeSanitizer {
    whitelist: Whitelist,
    text: TextPolicy,
    urls: UrlPolicy,
    root_tag: String,
}

impl TreeSanitizer {
    pub fn new(whitelist: Whitelist) -> Self {
        Self {
            whitelist,
            text: TextPolicy::default(),
            urls: UrlPolicy::default(),
            root_tag: DEFAULT_ROOT_TAG.to_string(),
        }
    }

    pub fn with_text_policy(mut self, text: TextPolicy) -> Self {
        self.text = text;
        self
    }

    pub fn with_url_policy(mut self, urls: UrlPolicy) -> Self {
        self.urls = urls;
        self
    }

    /// Tag of the container the content is attached to. It is never
    /// filtered, whether or not the whitelist contains it.
    pub fn with_root_tag(mut self, tag: &str) -> Self {
        self.root_tag = tag.to_string();
        self
    }

    /// Parse `html` under a fresh root and filter it
    pub fn sanitize_str(&self, html: &str) -> DomTree {
        let mut tree = DomTree::with_root(&self.root_tag);
        let root = tree.root();
        HtmlParser::new().parse_into(&mut tree, root, html);
        self.sanitize_tree(&mut tree);
        tree
    }

    /// Attach `node` from `source` under a fresh root and filter it.
    /// A fragment contributes its children, as DOM insertion does.
    pub fn sanitize_node(&self, source: DomTree, node: NodeId) -> DomTree {
        let mut tree = DomTree::with_root(&self.root_tag);
        let root = tree.root();

        let is_fragment = source
            .get(node)
            .is_some_and(|n| matches!(n.data, NodeData::Fragment));
        if is_fragment {
            for &child in source.children(node) {
                tree.import_subtree(&source, child, root);
            }
        } else {
            tree.import_subtree(&source, node, root);
        }

        self.sanitize_tree(&mut tree);
        tree
    }

    /// Filter everything below the root of `tree` in place
    pub fn sanitize_tree(&self, tree: &mut DomTree) -> SanitizeReport {
        let mut report = SanitizeReport::default();

        // Parents whose child lists still need filtering
        let mut pending = vec![tree.root()];
        while let Some(parent) = pending.pop() {
            let children = tree.children(parent).to_vec();
            let mut kept = Vec::with_capacity(children.len());
            for child in children {
                if self.admit(tree, child, &mut report) {
                    kept.push(child);
                    if tree.get(child).is_some_and(|n| n.is_element()) {
                        pending.push(child);
                    }
                }
            }
            tree.set_children(parent, kept);
        }

        tracing::debug!(
            removed_nodes = report.removed_nodes,
            removed_attributes = report.removed_attributes,
            "sanitized tree"
        );
        report
    }

    /// Returns whether `id` stays in its parent, stripping its attributes
    /// if it does
    fn admit(&self, tree: &mut DomTree, id: NodeId, report: &mut SanitizeReport) -> bool {
        let Some(node) = tree.get_mut(id) else {
            return false;
        };

        match &mut node.data {
            NodeData::Text(_) if self.text == TextPolicy::Keep => true,
            NodeData::Element(elem) if self.whitelist.allows_tag(&elem.local_name) => {
                report.removed_attributes += elem.retain_attrs(|attr| {
                    self.whitelist.allows_attribute(&attr.name) && self.urls.permits(attr)
                });
                true
            }
            _ => {
                tracing::trace!(node = ?id, "removing subtree");
                report.removed_nodes += 1;
                false
            }
        }
    }
}

impl Default for TreeSanitizer {
    fn default() -> Self {
        Self::new(Whitelist::default())
    }
}
