//! Maps resolved symbols back to the syntax nodes that declare them.

use serde::{Deserialize, Serialize};

use crate::node::{SourceTree, SyntaxNode};
use crate::text::{LineRange, TextRange};

/// Where a symbol was declared, as reported by the host's symbol resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    line_range: LineRange,
}

impl SymbolLocation {
    /// Creates a location from a line range.
    #[must_use]
    pub const fn new(line_range: LineRange) -> Self {
        Self {
            file: None,
            line_range,
        }
    }

    /// Records the file the symbol was declared in.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Returns the declaring file, if known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the declared line range.
    #[must_use]
    pub const fn line_range(&self) -> LineRange {
        self.line_range
    }
}

/// A resolved symbol handed over by the host compiler.
///
/// Built-in and synthetic symbols carry no location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<SymbolLocation>,
}

impl Symbol {
    /// Creates a symbol without a source location.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Attaches a declaration location.
    #[must_use]
    pub fn with_location(mut self, location: SymbolLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the symbol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declaration location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&SymbolLocation> {
        self.location.as_ref()
    }
}

/// Finds the node that declares `symbol` inside `tree`.
///
/// The symbol's line range is translated into byte offsets through the
/// tree's document and the deepest non-terminal covering that range is
/// returned. Returns `None` for symbols without a location and for ranges
/// that no longer fit the document.
#[must_use]
pub fn locate<'t, T: SourceTree>(tree: &'t T, symbol: &Symbol) -> Option<T::Node<'t>> {
    let line_range = symbol.location()?.line_range();
    let document = tree.document();
    let start = document.text_position_from(line_range.start())?;
    let end = document.text_position_from(line_range.end())?;
    if end < start {
        return None;
    }
    find_enclosing(tree.root(), TextRange::new(start, end))
}

/// Returns the deepest non-terminal under `root` whose range contains
/// `range`.
///
/// Tokens are never returned: a range that exactly covers a token resolves
/// to the node enclosing that token.
#[must_use]
pub fn find_enclosing<N: SyntaxNode>(root: N, range: TextRange) -> Option<N> {
    if root.is_token() || !root.range().contains_range(range) {
        return None;
    }
    let mut current = root;
    while let Some(child) = current
        .children()
        .into_iter()
        .find(|child| !child.is_token() && child.range().contains_range(range))
    {
        current = child;
    }
    Some(current)
}
