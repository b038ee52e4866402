//! Resource path resolution.
//!
//! Path segments arrive as the children of an absolute or relative resource
//! path node. They are concatenated in order and exactly one leading `/` is
//! dropped from the result, so `/hello` and `hello` both resolve to `hello`.

use fnpack_syntax::{SyntaxKind, SyntaxNode};

use crate::error::PathError;
use crate::extract::strip_delimiters;

/// A statically resolvable path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePathSegment {
    /// A string literal, stored without its quotes.
    Literal(String),
    /// A `/` separator.
    Slash,
    /// A bare identifier.
    Identifier(String),
}

impl ResourcePathSegment {
    /// Classifies a path node. Returns `None` for kinds that cannot be
    /// resolved without evaluation.
    #[must_use]
    pub fn from_node<N: SyntaxNode>(node: N) -> Option<Self> {
        let text = node.token_text()?;
        match node.kind() {
            SyntaxKind::StringLiteral => Some(Self::Literal(strip_delimiters(text).to_owned())),
            SyntaxKind::SlashToken => Some(Self::Slash),
            SyntaxKind::Identifier => Some(Self::Identifier(text.to_owned())),
            _ => None,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) | Self::Identifier(text) => text,
            Self::Slash => "/",
        }
    }
}

/// Concatenates segments and strips one leading slash.
///
/// # Example
///
/// ```
/// use fnpack_core::{ResourcePathSegment, join_segments};
///
/// let path = join_segments(&[
///     ResourcePathSegment::Literal("/x".into()),
///     ResourcePathSegment::Identifier("y".into()),
/// ]);
/// assert_eq!(path, "x/y");
/// ```
#[must_use]
pub fn join_segments(segments: &[ResourcePathSegment]) -> String {
    let mut joined: String = segments.iter().map(ResourcePathSegment::as_str).collect();
    if joined.starts_with('/') {
        joined.remove(0);
    }
    joined
}

/// Resolves path segments, silently skipping any that cannot be resolved.
#[must_use]
pub fn resolve_resource_path<N: SyntaxNode>(segments: impl IntoIterator<Item = N>) -> String {
    let resolved: Vec<_> = segments
        .into_iter()
        .filter_map(|node| {
            let segment = ResourcePathSegment::from_node(node);
            if segment.is_none() {
                tracing::debug!(kind = %node.kind(), "skipped resource path segment");
            }
            segment
        })
        .collect();
    join_segments(&resolved)
}

/// Path resolver with configurable handling of unresolvable segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathResolver {
    strict: bool,
}

impl PathResolver {
    /// Creates a resolver. A strict resolver fails on unresolvable segments.
    #[must_use]
    pub const fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// A resolver that skips unresolvable segments.
    #[must_use]
    pub const fn lenient() -> Self {
        Self::new(false)
    }

    /// A resolver that rejects unresolvable segments.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(true)
    }

    /// Returns `true` for a strict resolver.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Resolves `segments` into a path without a leading slash.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`PathError::UnsupportedSegment`] for the
    /// first segment that is not a literal, slash, or identifier.
    pub fn resolve<N: SyntaxNode>(
        &self,
        segments: impl IntoIterator<Item = N>,
    ) -> Result<String, PathError> {
        if !self.strict {
            return Ok(resolve_resource_path(segments));
        }
        let resolved = segments
            .into_iter()
            .map(|node| {
                ResourcePathSegment::from_node(node).ok_or(PathError::UnsupportedSegment {
                    kind: node.kind(),
                    range: node.range(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(join_segments(&resolved))
    }
}
