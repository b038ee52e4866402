//! Owned syntax tree and its incremental builder.
//!
//! [`SyntaxTree`] is the in-process representation used by tests and by the
//! JSON interchange format that host frontends export. [`TreeBuilder`]
//! assembles a tree token by token and derives every node range from the
//! text it has seen, so callers never compute offsets by hand.

use serde::{Deserialize, Serialize};

use crate::error::TreeBuildError;
use crate::kind::SyntaxKind;
use crate::node::{SourceTree, SyntaxNode};
use crate::text::{TextDocument, TextRange};

/// An owned node: a token with text, or a non-terminal with children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    kind: SyntaxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    range: TextRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a token node.
    #[must_use]
    pub fn token(kind: SyntaxKind, text: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            range,
            children: Vec::new(),
        }
    }

    /// Creates a non-terminal node.
    #[must_use]
    pub const fn node(kind: SyntaxKind, range: TextRange, children: Vec<Self>) -> Self {
        Self {
            kind,
            text: None,
            range,
            children,
        }
    }
}

impl<'a> SyntaxNode for &'a TreeNode {
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    fn token_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn range(&self) -> TextRange {
        self.range
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a TreeNode = *self;
        node.children.iter().collect()
    }
}

/// A syntax tree together with the document it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    source: TextDocument,
    root: TreeNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

impl SyntaxTree {
    /// Creates a tree from a document and its root node.
    #[must_use]
    pub const fn new(source: TextDocument, root: TreeNode) -> Self {
        Self {
            source,
            root,
            file: None,
        }
    }

    /// Records the file name the tree was parsed from.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl SourceTree for SyntaxTree {
    type Node<'a> = &'a TreeNode;

    fn root(&self) -> Self::Node<'_> {
        &self.root
    }

    fn document(&self) -> &TextDocument {
        &self.source
    }

    fn file_name(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

struct OpenNode {
    kind: SyntaxKind,
    start: usize,
    children: Vec<TreeNode>,
}

/// Incremental builder for [`SyntaxTree`].
///
/// Tokens and trivia append to the document text; `start_node` and
/// `finish_node` bracket non-terminals. Misuse is recorded and surfaced by
/// [`finish`](Self::finish) so calls can be chained.
#[derive(Default)]
pub struct TreeBuilder {
    text: String,
    stack: Vec<OpenNode>,
    root: Option<TreeNode>,
    error: Option<TreeBuildError>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a non-terminal node.
    pub fn start_node(&mut self, kind: SyntaxKind) -> &mut Self {
        if self.root.is_some() && self.stack.is_empty() {
            self.record(TreeBuildError::MultipleRoots { kind });
        }
        self.stack.push(OpenNode {
            kind,
            start: self.text.len(),
            children: Vec::new(),
        });
        self
    }

    /// Appends a token to the innermost open node.
    pub fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        let start = self.text.len();
        self.text.push_str(text);
        let token = TreeNode::token(kind, text, TextRange::new(start, self.text.len()));
        match self.stack.last_mut() {
            Some(open) => open.children.push(token),
            None => self.record(TreeBuildError::TokenOutsideNode { kind }),
        }
        self
    }

    /// Appends source text that belongs to no token (whitespace, comments).
    pub fn trivia(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) -> &mut Self {
        let Some(open) = self.stack.pop() else {
            self.record(TreeBuildError::UnbalancedFinish);
            return self;
        };
        let node = TreeNode::node(
            open.kind,
            TextRange::new(open.start, self.text.len()),
            open.children,
        );
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
        self
    }

    /// Completes the tree.
    ///
    /// # Errors
    ///
    /// Returns the first recorded misuse, [`TreeBuildError::UnclosedNodes`]
    /// when nodes are still open, or [`TreeBuildError::Empty`] when no node
    /// was built.
    pub fn finish(self) -> Result<SyntaxTree, TreeBuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.stack.is_empty() {
            return Err(TreeBuildError::UnclosedNodes {
                open: self.stack.len(),
            });
        }
        let root = self.root.ok_or(TreeBuildError::Empty)?;
        Ok(SyntaxTree::new(TextDocument::new(self.text), root))
    }

    fn record(&mut self, error: TreeBuildError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
