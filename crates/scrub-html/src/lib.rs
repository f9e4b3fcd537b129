//! scrub HTML front end
//!
//! Parses markup into a [`DomTree`] with html5ever and serializes subtrees
//! back to markup. Both directions walk the tree with explicit stacks, so
//! hostile nesting depth cannot exhaust the call stack.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{serialize_children, serialize_node};

use scrub_dom::DomTree;

/// Parse an HTML fragment into a fresh tree rooted at an anonymous fragment
pub fn parse_fragment(html: &str) -> DomTree {
    HtmlParser::new().parse_fragment(html)
}
