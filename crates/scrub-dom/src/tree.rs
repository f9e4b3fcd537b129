//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree. Index 0 is always the root.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree whose root is an anonymous fragment
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Fragment)],
        }
    }

    /// Create a tree whose root is an element with the given tag
    pub fn with_root(tag: &str) -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Element(ElementData::new(tag)))],
        }
    }

    /// Root node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so it is empty when the root has no children
    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }

    /// Allocate a detached node
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_node(NodeData::Element(ElementData::new(tag)))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.create_node(NodeData::Text(content.to_string()))
    }

    /// Allocate a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.create_node(NodeData::Comment(content.to_string()))
    }

    /// Append `child` as last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            tracing::warn!(?parent, ?child, "append_child with invalid ids");
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = parent;
        self.nodes[parent.index()].children.push(child);
    }

    /// Unlink a node from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).map(|n| n.parent) else {
            return;
        };
        if !parent.is_valid() {
            return;
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        self.nodes[id.index()].parent = NodeId::NONE;
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Replace a node's child list, typically with a filtered copy of the
    /// current one. Children missing from `children` become detached.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let old = std::mem::take(&mut node.children);
        for child in old {
            self.nodes[child.index()].parent = NodeId::NONE;
        }
        for &child in &children {
            self.nodes[child.index()].parent = id;
        }
        self.nodes[id.index()].children = children;
    }

    /// Deep-copy `node` from `source` and append the copy under `parent`.
    /// Returns the ID of the copy in this tree.
    pub fn import_subtree(&mut self, source: &DomTree, node: NodeId, parent: NodeId) -> NodeId {
        if source.get(node).is_none() {
            return NodeId::NONE;
        }

        let mut copy_of_top = NodeId::NONE;
        let mut stack = vec![(node, parent)];
        while let Some((src_id, dest_parent)) = stack.pop() {
            let Some(src) = source.get(src_id) else {
                continue;
            };
            let copy = self.create_node(src.data.clone());
            self.append_child(dest_parent, copy);
            if !copy_of_top.is_valid() {
                copy_of_top = copy;
            }
            stack.extend(src.children.iter().rev().map(|&child| (child, copy)));
        }
        copy_of_top
    }

    /// Pre-order walk of everything below `id` (not including `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let text = tree.create_text("hello");
        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        tree.append_child(p, text);
        (tree, div, p, text)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, div, p, text) = sample();
        assert_eq!(tree.children(tree.root()), &[div]);
        assert_eq!(tree.children(div), &[p]);
        assert_eq!(tree.get(text).unwrap().parent, p);
        assert_eq!(tree.text_content(tree.root()), "hello");
    }

    #[test]
    fn test_reparent_moves_node() {
        let (mut tree, div, p, _) = sample();
        let root = tree.root();
        tree.append_child(root, p);

        assert!(tree.children(div).is_empty());
        assert_eq!(tree.children(root), &[div, p]);
    }

    #[test]
    fn test_detach_keeps_arena() {
        let (mut tree, div, p, _) = sample();
        let len = tree.len();
        tree.detach(p);

        assert!(tree.children(div).is_empty());
        assert!(!tree.get(p).unwrap().parent.is_valid());
        assert_eq!(tree.len(), len);
        assert_eq!(tree.text_content(tree.root()), "");
    }

    #[test]
    fn test_set_children_filters() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("i");
        for id in [a, b, c] {
            tree.append_child(root, id);
        }

        tree.set_children(root, vec![a, c]);
        assert_eq!(tree.children(root), &[a, c]);
        assert!(!tree.get(b).unwrap().parent.is_valid());
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, div, p, text) = sample();
        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![div, p, text]);
    }

    #[test]
    fn test_import_subtree() {
        let (source, div, _, _) = sample();
        let mut target = DomTree::with_root("section");
        let copy = target.import_subtree(&source, div, NodeId::ROOT);

        assert_eq!(target.children(NodeId::ROOT), &[copy]);
        assert_eq!(target.text_content(copy), "hello");
        assert_eq!(
            target.get(copy).and_then(Node::as_element).map(|e| e.tag_name()),
            Some("DIV".to_string())
        );
    }

    #[test]
    fn test_import_deep_subtree() {
        let mut source = DomTree::new();
        let mut parent = source.root();
        for _ in 0..100_000 {
            let div = source.create_element("div");
            source.append_child(parent, div);
            parent = div;
        }
        let leaf = source.create_text("deep");
        source.append_child(parent, leaf);

        let top = source.children(source.root())[0];
        let mut target = DomTree::new();
        let copy = target.import_subtree(&source, top, NodeId::ROOT);

        assert_eq!(target.len(), source.len());
        assert_eq!(target.children(NodeId::ROOT), &[copy]);
        assert_eq!(target.text_content(copy), "deep");
    }

    #[test]
    fn test_is_empty() {
        let tree = DomTree::with_root("div");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
    }
}
