//! Markup serialization
//!
//! Follows the HTML fragment serialization algorithm: void elements get no
//! end tag, raw-text elements keep their text verbatim, everything else is
//! escaped. Attribute values escape `<` and `>` as well as `&` and `"`, so a
//! later string-level rewrite of the markup can never turn attribute
//! content into tags.
//!
//! The walk uses an explicit stack; nesting depth is bounded only by memory.

use scrub_dom::{DomTree, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

enum Step {
    Open(NodeId),
    Close(NodeId),
}

fn escape_into(out: &mut String, text: &str, in_attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

fn is_raw_text_parent(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id)
        .and_then(|node| tree.get(node.parent))
        .and_then(|parent| parent.as_element())
        .is_some_and(|elem| RAW_TEXT_ELEMENTS.contains(&elem.local_name.as_str()))
}

fn write_open(tree: &DomTree, id: NodeId, out: &mut String, stack: &mut Vec<Step>) {
    let Some(node) = tree.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Fragment => {
            stack.extend(node.children.iter().rev().map(|&child| Step::Open(child)));
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.local_name);
            for attr in &elem.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_into(out, &attr.value, true);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&elem.local_name.as_str()) {
                return;
            }
            stack.push(Step::Close(id));
            stack.extend(node.children.iter().rev().map(|&child| Step::Open(child)));
        }
        NodeData::Text(text) => {
            if is_raw_text_parent(tree, id) {
                out.push_str(text);
            } else {
                escape_into(out, text, false);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn write_steps(tree: &DomTree, mut stack: Vec<Step>) -> String {
    let mut out = String::new();
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => write_open(tree, id, &mut out, &mut stack),
            Step::Close(id) => {
                if let Some(elem) = tree.get(id).and_then(|n| n.as_element()) {
                    out.push_str("</");
                    out.push_str(&elem.local_name);
                    out.push('>');
                }
            }
        }
    }
    out
}

/// Serialize the children of `id` (the `innerHTML` of the node)
pub fn serialize_children(tree: &DomTree, id: NodeId) -> String {
    let stack = tree
        .children(id)
        .iter()
        .rev()
        .map(|&child| Step::Open(child))
        .collect();
    write_steps(tree, stack)
}

/// Serialize `id` itself and its subtree (the `outerHTML` of the node)
pub fn serialize_node(tree: &DomTree, id: NodeId) -> String {
    write_steps(tree, vec![Step::Open(id)])
}
