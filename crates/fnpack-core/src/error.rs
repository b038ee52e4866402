//! Error types raised while extracting and validating service declarations.
//!
//! Extraction-shape problems that callers may tolerate are modelled as
//! `Option` results, not errors. The types here cover precondition
//! violations, strict path resolution, and the diagnostic-carrying error used
//! to abandon a single declaration.

use fnpack_syntax::{SyntaxKind, TextRange};
use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Errors from [`extract_field_value`](crate::extract_field_value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The field has no value expression.
    ///
    /// Callers must only hand over fields that syntactically carry a value.
    #[error("annotation field '{}' has no value expression", .field.as_deref().unwrap_or("<unnamed>"))]
    MissingValue {
        /// Name of the field, when it has one.
        field: Option<String>,
        /// Range of the field node.
        range: TextRange,
    },
}

/// Errors from strict resource path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// A segment is neither a literal, a slash, nor an identifier.
    #[error("unsupported resource path segment of kind {kind}")]
    UnsupportedSegment {
        /// Kind of the offending node.
        kind: SyntaxKind,
        /// Range of the offending node.
        range: TextRange,
    },
}

impl PathError {
    /// Returns the kind of the rejected node.
    #[must_use]
    pub const fn kind(&self) -> SyntaxKind {
        match self {
            Self::UnsupportedSegment { kind, .. } => *kind,
        }
    }

    /// Returns the range of the rejected node.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        match self {
            Self::UnsupportedSegment { range, .. } => *range,
        }
    }
}

/// Carries a pre-built [`Diagnostic`] up to the top-level analysis entry
/// point, which reports it and stops processing the current declaration.
///
/// # Example
///
/// ```
/// use fnpack_core::{Diagnostic, DiagnosticCode, FunctionsError, SourceLocation};
///
/// let diagnostic = Diagnostic::new(
///     DiagnosticCode::MissingFieldValue,
///     SourceLocation::default(),
///     &[&"authLevel"],
/// );
/// let error = FunctionsError::new(diagnostic);
/// assert_eq!(error.to_string(), "Annotation field 'authLevel' has no value");
/// ```
#[derive(Debug, Error)]
#[error("{}", .diagnostic.message())]
pub struct FunctionsError {
    diagnostic: Box<Diagnostic>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FunctionsError {
    /// Wraps a diagnostic.
    #[must_use]
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic: Box::new(diagnostic),
            source: None,
        }
    }

    /// Wraps a diagnostic together with the error that caused it.
    #[must_use]
    pub fn with_source(
        diagnostic: Diagnostic,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            diagnostic: Box::new(diagnostic),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the carried diagnostic.
    #[must_use]
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consumes the error, yielding the diagnostic.
    #[must_use]
    pub fn into_diagnostic(self) -> Diagnostic {
        *self.diagnostic
    }
}

impl From<Diagnostic> for FunctionsError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}
