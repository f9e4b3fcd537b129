//! Tag and attribute allow-lists
//!
//! Whatever is not listed here is removed.

use std::collections::HashSet;

/// Tags allowed by default, in DOM `tagName` form
pub const DEFAULT_TAGS: &[&str] = &[
    "A", "B", "BODY", "BR", "DIV", "EM", "HR", "I", "IMG", "P", "SPAN", "STRONG", "UL", "OL",
    "LI", "TABLE", "TR", "THEAD", "TBODY", "TD", "TH",
];

/// Attributes allowed by default
pub const DEFAULT_ATTRIBUTES: &[&str] = &["href", "src", "data-nodeid"];

/// Read-only allow-lists handed to a sanitizer at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    /// Uppercase tag names
    tags: HashSet<String>,
    /// Lowercase attribute names
    attributes: HashSet<String>,
}

impl Whitelist {
    /// Build a whitelist from arbitrary names. Tag case does not matter;
    /// attribute names are compared lowercase, as the parser emits them.
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().to_ascii_uppercase())
                .collect(),
            attributes: attributes
                .into_iter()
                .map(|a| a.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether an element with this tag name survives
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_uppercase())
    }

    /// Whether an attribute with this name survives
    pub fn allows_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS, DEFAULT_ATTRIBUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags() {
        let wl = Whitelist::default();
        for tag in ["a", "B", "Body", "td", "STRONG"] {
            assert!(wl.allows_tag(tag), "{tag} should be allowed");
        }
        for tag in ["script", "IFRAME", "style", "svg", "form", "h1"] {
            assert!(!wl.allows_tag(tag), "{tag} should be rejected");
        }
    }

    #[test]
    fn test_default_attributes() {
        let wl = Whitelist::default();
        assert!(wl.allows_attribute("href"));
        assert!(wl.allows_attribute("src"));
        assert!(wl.allows_attribute("data-nodeid"));
        assert!(!wl.allows_attribute("onclick"));
        assert!(!wl.allows_attribute("style"));
        assert!(!wl.allows_attribute("class"));
    }

    #[test]
    fn test_override() {
        let wl = Whitelist::new(["h1"], ["Title"]);
        assert!(wl.allows_tag("H1"));
        assert!(!wl.allows_tag("p"));
        assert!(wl.allows_attribute("title"));
        assert!(!wl.allows_attribute("href"));
    }
}
