//! Identity tokens for presenter instances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied identity of a presenter instance across render passes.
///
/// Tokens are paths: a root name followed by child segments. Segments are
/// kept apart, so a segment containing `/` never collides with a deeper
/// path. `Display` joins them with `/` for diagnostics only.
///
/// # Example
///
/// ```rust
/// use rewind::memo::Token;
///
/// let items = Token::root("state").child("items");
/// assert_eq!(items.child(3).to_string(), "state/items/3");
/// assert_ne!(items.child("a/b"), items.child("a").child("b"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Vec<String>);

impl Token {
    pub fn root(name: impl Into<String>) -> Self {
        Token(vec![name.into()])
    }

    /// Token of a child of this node.
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Token(segments)
    }

    /// Path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
