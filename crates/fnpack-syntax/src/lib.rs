//! Host-neutral syntax tree model for the fnpack toolchain.
//!
//! The host compiler owns parsing and symbol resolution. This crate defines
//! the narrow, read-only view of its output that the extraction pipeline
//! depends on:
//!
//! - [`SyntaxNode`] - node kind, token text, source range, and children
//! - [`SourceTree`] - a root node plus the [`TextDocument`] it was parsed from
//! - [`SyntaxTree`] - an owned implementation, built with [`TreeBuilder`] or
//!   deserialized from a JSON export
//! - [`locate`] - maps a resolved [`Symbol`] back to its declaring node
//!
//! # Example
//!
//! ```
//! use fnpack_syntax::{SyntaxKind, SyntaxNode, SourceTree, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder
//!     .start_node(SyntaxKind::AbsoluteResourcePath)
//!     .token(SyntaxKind::SlashToken, "/")
//!     .token(SyntaxKind::Identifier, "hello")
//!     .finish_node();
//! let tree = builder.finish()?;
//!
//! assert_eq!(tree.root().children().len(), 2);
//! assert_eq!(tree.document().text(), "/hello");
//! # Ok::<(), fnpack_syntax::TreeBuildError>(())
//! ```

mod error;
mod kind;
mod locate;
mod node;
mod text;
mod tree;

pub use error::TreeBuildError;
pub use kind::SyntaxKind;
pub use locate::{Symbol, SymbolLocation, find_enclosing, locate};
pub use node::{SourceTree, SyntaxNode};
pub use text::{LinePosition, LineRange, TextDocument, TextRange};
pub use tree::{SyntaxTree, TreeBuilder, TreeNode};

#[cfg(test)]
mod tests;
