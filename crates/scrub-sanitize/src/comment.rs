//! Comment stripping
//!
//! Runs on the raw string before parsing. Comments can hide conditional
//! markup, and they can split a reference token (`KB-<!-- -->42`) so the
//! linker would otherwise see two halves.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Non-greedy and dot-matches-newline, so each region ends at its own `-->`
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_RE: hardcoded regex is valid"));

/// Removes `<!-- ... -->` regions from raw markup
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper;

impl CommentStripper {
    pub fn new() -> Self {
        Self
    }

    /// Remove every comment region. Input without comments is borrowed back.
    pub fn strip<'a>(&self, input: &'a str) -> Cow<'a, str> {
        COMMENT_RE.replace_all(input, "")
    }
}

/// Shorthand for [`CommentStripper::strip`]
pub fn strip_comments(input: &str) -> Cow<'_, str> {
    CommentStripper.strip(input)
}
