//! The read-only node interface the pipeline is written against.

use std::fmt::Debug;

use crate::kind::SyntaxKind;
use crate::text::{TextDocument, TextRange};

/// A node in a host-produced syntax tree.
///
/// Tokens are leaves and carry their source text; non-terminal nodes carry
/// children. Implementations are cheap handles (typically a shared
/// reference) so the trait requires `Copy`.
pub trait SyntaxNode: Copy + Debug {
    /// Returns the node kind.
    fn kind(&self) -> SyntaxKind;

    /// Returns the raw source text of a token, or `None` for non-terminals.
    fn token_text(&self) -> Option<&str>;

    /// Returns the byte range the node spans in its document.
    fn range(&self) -> TextRange;

    /// Returns the direct children in source order.
    fn children(&self) -> Vec<Self>;

    /// Returns `true` when the node is a token.
    fn is_token(&self) -> bool {
        self.token_text().is_some()
    }

    /// Returns the first direct child of the given kind.
    fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().into_iter().find(|child| child.kind() == kind)
    }

    /// Returns every direct child of the given kind.
    fn children_of_kind(&self, kind: SyntaxKind) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.kind() == kind)
            .collect()
    }
}

/// A parsed document: its root node and the text it was parsed from.
pub trait SourceTree {
    /// Node handle type borrowed from the tree.
    type Node<'a>: SyntaxNode
    where
        Self: 'a;

    /// Returns the root node.
    fn root(&self) -> Self::Node<'_>;

    /// Returns the source document.
    fn document(&self) -> &TextDocument;

    /// Returns the file name the document was loaded from, if known.
    fn file_name(&self) -> Option<&str> {
        None
    }
}
