//! Static values of annotation fields.
//!
//! A field node has the shape `Identifier ColonToken <expression>`. Only
//! string and decimal integer literals have a value that can be read without
//! evaluating the program; every other expression is reported as absent and
//! the caller decides whether that is an error.

use fnpack_syntax::{SyntaxKind, SyntaxNode, TextRange};

use crate::error::ExtractError;

/// Classification of a field's value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValueKind {
    /// A quoted string literal.
    String,
    /// A decimal integer literal.
    Integer,
    /// Any other expression.
    Unsupported,
}

/// A classified annotation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationField {
    name: Option<String>,
    kind: FieldValueKind,
    raw_text: String,
    range: TextRange,
}

impl AnnotationField {
    /// Classifies the value expression of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingValue`] when the field has no value
    /// expression.
    pub fn from_field<N: SyntaxNode>(field: N) -> Result<Self, ExtractError> {
        let name = field_name(field);
        let Some(value) = value_expression(field) else {
            return Err(ExtractError::MissingValue {
                field: name,
                range: field.range(),
            });
        };
        let raw_text = value.token_text().unwrap_or_default().to_owned();
        let kind = match value.kind() {
            SyntaxKind::StringLiteral if value.is_token() => FieldValueKind::String,
            SyntaxKind::DecimalIntegerLiteral if value.is_token() => FieldValueKind::Integer,
            _ => FieldValueKind::Unsupported,
        };
        Ok(Self {
            name,
            kind,
            raw_text,
            range: value.range(),
        })
    }

    /// Returns the field name, if the field has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the value classification.
    #[must_use]
    pub const fn kind(&self) -> FieldValueKind {
        self.kind
    }

    /// Returns the value's source text. Empty for non-token expressions.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Returns the range of the value expression.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Returns the static value, or `None` for unsupported expressions.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        match self.kind {
            FieldValueKind::String => Some(strip_delimiters(&self.raw_text).to_owned()),
            FieldValueKind::Integer => Some(self.raw_text.clone()),
            FieldValueKind::Unsupported => None,
        }
    }
}

/// Returns the static value of an annotation field.
///
/// String literals lose their two delimiting quotes, integer literals are
/// returned exactly as written, and any other expression yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`ExtractError::MissingValue`] when the field has no value
/// expression. Callers must only pass fields that carry one.
pub fn extract_field_value<N: SyntaxNode>(field: N) -> Result<Option<String>, ExtractError> {
    let value = AnnotationField::from_field(field)?.value();
    tracing::debug!(field = ?field_name(field), ?value, "extracted annotation field");
    Ok(value)
}

/// Returns the key of an annotation field.
#[must_use]
pub fn field_name<N: SyntaxNode>(field: N) -> Option<String> {
    field
        .children()
        .into_iter()
        .take_while(|child| child.kind() != SyntaxKind::ColonToken)
        .find(|child| child.kind() == SyntaxKind::Identifier)
        .and_then(|child| child.token_text().map(str::to_owned))
}

fn value_expression<N: SyntaxNode>(field: N) -> Option<N> {
    field
        .children()
        .into_iter()
        .skip_while(|child| child.kind() != SyntaxKind::ColonToken)
        .nth(1)
}

/// Drops the first and last character of a quoted literal.
pub(crate) fn strip_delimiters(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
