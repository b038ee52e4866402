//! Node kinds understood by the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag of a syntax node.
///
/// Host frontends map their own node classes onto this closed set. Anything
/// the pipeline does not inspect maps to [`Other`](Self::Other), which is also
/// the fallback when deserializing an unknown tag.
///
/// # Example
///
/// ```
/// use fnpack_syntax::SyntaxKind;
///
/// assert_eq!(SyntaxKind::StringLiteral.as_str(), "string_literal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SyntaxKind {
    /// Root of a compilation unit.
    ModulePart,
    /// A `service` declaration.
    ServiceDeclaration,
    /// A module-level listener declaration.
    ListenerDeclaration,
    /// An annotation attachment such as `@HttpTrigger { ... }`.
    Annotation,
    /// The (possibly module-qualified) name of an annotation.
    AnnotationReference,
    /// A `{ key: value, ... }` mapping constructor.
    MappingConstructor,
    /// A single `key: value` field inside a mapping constructor.
    SpecificField,
    /// The base path of a service declaration.
    AbsoluteResourcePath,
    /// The path of a resource accessor, relative to the service base path.
    RelativeResourcePath,
    /// A resource accessor (resource function) definition.
    ResourceAccessorDefinition,
    /// The return type descriptor of a function, carrying output annotations.
    ReturnTypeDescriptor,
    /// A quoted string literal token.
    StringLiteral,
    /// A decimal integer literal token.
    DecimalIntegerLiteral,
    /// A `true` or `false` literal token.
    BooleanLiteral,
    /// An identifier token.
    Identifier,
    /// A `/` token.
    SlashToken,
    /// A `:` token.
    ColonToken,
    /// A reserved keyword token.
    Keyword,
    /// A function call expression.
    FunctionCall,
    /// A string template or interpolation expression.
    TemplateExpression,
    /// Any node kind the pipeline does not inspect.
    #[serde(other)]
    Other,
}

impl SyntaxKind {
    /// Returns the canonical snake-case tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModulePart => "module_part",
            Self::ServiceDeclaration => "service_declaration",
            Self::ListenerDeclaration => "listener_declaration",
            Self::Annotation => "annotation",
            Self::AnnotationReference => "annotation_reference",
            Self::MappingConstructor => "mapping_constructor",
            Self::SpecificField => "specific_field",
            Self::AbsoluteResourcePath => "absolute_resource_path",
            Self::RelativeResourcePath => "relative_resource_path",
            Self::ResourceAccessorDefinition => "resource_accessor_definition",
            Self::ReturnTypeDescriptor => "return_type_descriptor",
            Self::StringLiteral => "string_literal",
            Self::DecimalIntegerLiteral => "decimal_integer_literal",
            Self::BooleanLiteral => "boolean_literal",
            Self::Identifier => "identifier",
            Self::SlashToken => "slash_token",
            Self::ColonToken => "colon_token",
            Self::Keyword => "keyword",
            Self::FunctionCall => "function_call",
            Self::TemplateExpression => "template_expression",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
