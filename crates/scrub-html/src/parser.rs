//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts to our arena tree.
//! The implicit `html`, `head` and `body` wrappers the tree builder
//! inserts are not copied: their contents are hoisted under the target.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use scrub_dom::{Attribute, DomTree, ElementData, NodeData, NodeId};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse into a fresh fragment-rooted tree
    pub fn parse_fragment(&self, html: &str) -> DomTree {
        let mut tree = DomTree::new();
        let root = tree.root();
        self.parse_into(&mut tree, root, html);
        tree
    }

    /// Parse `html` and append the resulting top-level nodes under `parent`
    pub fn parse_into(&self, tree: &mut DomTree, parent: NodeId, html: &str) {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut top_level = Vec::new();
        for child in dom.document.children.borrow().iter() {
            match &child.data {
                RcNodeData::Doctype { .. } => {}
                RcNodeData::Element { name, .. } if &*name.local == "html" => {
                    Self::hoist_document_sections(child, &mut top_level);
                }
                _ => top_level.push(child.clone()),
            }
        }

        let before = tree.len();
        let mut stack: Vec<(Handle, NodeId)> = top_level
            .into_iter()
            .rev()
            .map(|handle| (handle, parent))
            .collect();
        while let Some((handle, parent)) = stack.pop() {
            if let Some(id) = self.convert_node(&handle, tree, parent) {
                stack.extend(
                    handle
                        .children
                        .borrow()
                        .iter()
                        .rev()
                        .map(|child| (child.clone(), id)),
                );
            }
        }

        tracing::debug!("Parsed {} nodes", tree.len() - before);
    }

    /// Collect the children of `<head>` and `<body>` (in that order) rather
    /// than the sections themselves
    fn hoist_document_sections(html: &Handle, out: &mut Vec<Handle>) {
        for section in html.children.borrow().iter() {
            let is_wrapper = matches!(
                &section.data,
                RcNodeData::Element { name, .. } if matches!(&*name.local, "head" | "body")
            );
            if is_wrapper {
                out.extend(section.children.borrow().iter().cloned());
            } else {
                out.push(section.clone());
            }
        }
    }

    /// Convert one RcDom node to our DOM format and append it under
    /// `parent`. Returns the node its children belong under, if any.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Option<NodeId> {
        match &handle.data {
            RcNodeData::Document => Some(parent),
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_node(NodeData::Doctype {
                    name: name.to_string(),
                });
                tree.append_child(parent, id);
                None
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id);
                None
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
                None
            }
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new(&*name.local);
                elem.attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| Attribute::new(&*attr.name.local, attr.value.to_string()))
                    .collect();

                let id = tree.create_node(NodeData::Element(elem));
                tree.append_child(parent, id);
                Some(id)
            }
            // Not produced by the HTML tree builder
            RcNodeData::ProcessingInstruction { .. } => None,
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
