//! Error types for syntax tree construction.

use thiserror::Error;

use crate::kind::SyntaxKind;

/// Errors raised when a [`TreeBuilder`](crate::TreeBuilder) is driven out of
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeBuildError {
    /// A token was pushed while no node was open.
    #[error("token of kind {kind} pushed outside of any node")]
    TokenOutsideNode {
        /// Kind of the orphaned token.
        kind: SyntaxKind,
    },

    /// `finish_node` was called with no open node.
    #[error("finish_node called without a matching start_node")]
    UnbalancedFinish,

    /// A second top-level node was started after the root was closed.
    #[error("a second root node of kind {kind} was started")]
    MultipleRoots {
        /// Kind of the extra root.
        kind: SyntaxKind,
    },

    /// The builder was finished while nodes were still open.
    #[error("{open} node(s) left open when the tree was finished")]
    UnclosedNodes {
        /// Number of nodes still open.
        open: usize,
    },

    /// The builder was finished without producing any node.
    #[error("the tree has no root node")]
    Empty,
}
