//! Diagnostic table, rendering, and reporting.
//!
//! Every user-facing problem found while analysing a service is surfaced as a
//! [`Diagnostic`] built from one entry of the fixed [`DiagnosticCode`] table.
//! The table is a wire contract: tooling matches on the stable code strings,
//! so existing entries never change code or severity.
//!
//! Diagnostics are handed straight to a host-provided [`DiagnosticSink`];
//! the reporter never buffers, reorders, or deduplicates them.

use std::fmt;

use fnpack_syntax::{LineRange, SourceTree, SyntaxNode, TextRange};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The declaration cannot be deployed.
    Error,
    /// The declaration deploys, but probably not as intended.
    Warning,
    /// Informational progress output.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("ERROR"),
            Self::Warning => f.write_str("WARNING"),
            Self::Info => f.write_str("INFO"),
        }
    }
}

/// Stable diagnostic codes.
///
/// Each variant maps to a fixed code string, a printf-style message template,
/// and a severity.
///
/// # Example
///
/// ```
/// use fnpack_core::{DiagnosticCode, Severity};
///
/// let code = DiagnosticCode::InvalidFieldValue;
/// assert_eq!(code.code(), "AF_101");
/// assert_eq!(code.severity(), Severity::Error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DiagnosticCode {
    /// A field holds a literal outside its allowed set.
    InvalidFieldValue,
    /// A field value is not a string or integer literal.
    UnsupportedFieldValue,
    /// A field has no value expression.
    MissingFieldValue,
    /// A required annotation field is absent.
    MissingRequiredField,
    /// A resource accessor is not an HTTP method.
    UnsupportedAccessor,
    /// A resource path segment cannot be resolved statically.
    UnsupportedPathSegment,
    /// Two resources derive the same function name.
    DuplicateFunctionName,
    /// A return-type annotation is not an output binding.
    UnknownOutputBinding,
    /// A service declares no resource functions.
    NoResourceFunctions,
    /// A function descriptor was generated.
    FunctionGenerated,
}

impl DiagnosticCode {
    /// The complete table, in code order.
    pub const ALL: [Self; 10] = [
        Self::InvalidFieldValue,
        Self::UnsupportedFieldValue,
        Self::MissingFieldValue,
        Self::MissingRequiredField,
        Self::UnsupportedAccessor,
        Self::UnsupportedPathSegment,
        Self::DuplicateFunctionName,
        Self::UnknownOutputBinding,
        Self::NoResourceFunctions,
        Self::FunctionGenerated,
    ];

    /// Returns the stable code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidFieldValue => "AF_101",
            Self::UnsupportedFieldValue => "AF_102",
            Self::MissingFieldValue => "AF_103",
            Self::MissingRequiredField => "AF_104",
            Self::UnsupportedAccessor => "AF_105",
            Self::UnsupportedPathSegment => "AF_106",
            Self::DuplicateFunctionName => "AF_107",
            Self::UnknownOutputBinding => "AF_108",
            Self::NoResourceFunctions => "AF_109",
            Self::FunctionGenerated => "AF_110",
        }
    }

    /// Returns the message template with `%s` / `%d` placeholders.
    #[must_use]
    pub const fn message_template(self) -> &'static str {
        match self {
            Self::InvalidFieldValue => "Invalid value '%s' for field '%s'",
            Self::UnsupportedFieldValue => {
                "Value of annotation field '%s' must be a string or integer literal"
            }
            Self::MissingFieldValue => "Annotation field '%s' has no value",
            Self::MissingRequiredField => "Missing required field '%s' in annotation '%s'",
            Self::UnsupportedAccessor => "Unsupported resource accessor '%s'",
            Self::UnsupportedPathSegment => "Unsupported resource path segment of kind '%s'",
            Self::DuplicateFunctionName => "Duplicate function name '%s'",
            Self::UnknownOutputBinding => "Unknown output binding annotation '%s' is ignored",
            Self::NoResourceFunctions => "Service '%s' declares no resource functions",
            Self::FunctionGenerated => "Function '%s' generated for route '%s'",
        }
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnknownOutputBinding | Self::NoResourceFunctions => Severity::Warning,
            Self::FunctionGenerated => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Looks up a code by its stable string.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.code() == code)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Raised when a template and its arguments disagree.
///
/// This is a programming error in the caller, never a user-facing problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template '{template}' expects {expected} argument(s) but {actual} were supplied")]
pub struct TemplateError {
    template: String,
    expected: usize,
    actual: usize,
}

impl TemplateError {
    /// Returns the number of placeholders in the template.
    #[must_use]
    pub const fn expected(&self) -> usize {
        self.expected
    }

    /// Returns the number of arguments supplied.
    #[must_use]
    pub const fn actual(&self) -> usize {
        self.actual
    }
}

fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars();
    while let Some(current) = chars.next() {
        if current != '%' {
            continue;
        }
        if matches!(chars.next(), Some('s' | 'd')) {
            count += 1;
        }
    }
    count
}

/// Renders a printf-style template.
///
/// `%s` and `%d` consume the next argument in order, `%%` renders a literal
/// `%`, and any other `%` sequence is copied through unchanged.
///
/// # Errors
///
/// Returns [`TemplateError`] when the number of placeholders differs from
/// the number of arguments.
///
/// # Example
///
/// ```
/// use fnpack_core::render_template;
///
/// let message = render_template("Invalid value '%s' for field '%s'", &[&"x", &"port"])?;
/// assert_eq!(message, "Invalid value 'x' for field 'port'");
/// # Ok::<(), fnpack_core::TemplateError>(())
/// ```
pub fn render_template(
    template: &str,
    args: &[&dyn fmt::Display],
) -> Result<String, TemplateError> {
    let expected = placeholder_count(template);
    if expected != args.len() {
        return Err(TemplateError {
            template: template.to_owned(),
            expected,
            actual: args.len(),
        });
    }

    let mut rendered = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars();
    while let Some(current) = chars.next() {
        if current != '%' {
            rendered.push(current);
            continue;
        }
        match chars.next() {
            Some('s' | 'd') => {
                if let Some(arg) = remaining.next() {
                    rendered.push_str(&arg.to_string());
                }
            }
            Some('%') => rendered.push('%'),
            Some(other) => {
                rendered.push('%');
                rendered.push(other);
            }
            None => rendered.push('%'),
        }
    }
    Ok(rendered)
}

/// Renders the message for `code`, falling back to the raw template plus
/// arguments when they disagree.
fn render_message(code: DiagnosticCode, args: &[&dyn fmt::Display]) -> String {
    render_template(code.message_template(), args).unwrap_or_else(|error| {
        tracing::error!(code = code.code(), %error, "diagnostic template mismatch");
        let joined = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} [{joined}]", code.message_template())
    })
}

/// Where in the source a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    text_range: TextRange,
    line_range: LineRange,
}

impl SourceLocation {
    /// Creates a location from explicit ranges.
    #[must_use]
    pub const fn new(file: Option<String>, text_range: TextRange, line_range: LineRange) -> Self {
        Self {
            file,
            text_range,
            line_range,
        }
    }

    /// Derives the location of `node` inside `tree`.
    #[must_use]
    pub fn of<T: SourceTree, N: SyntaxNode>(tree: &T, node: N) -> Self {
        Self::from_range(tree, node.range())
    }

    /// Derives the location of a byte range inside `tree`.
    #[must_use]
    pub fn from_range<T: SourceTree>(tree: &T, text_range: TextRange) -> Self {
        let line_range = tree
            .document()
            .line_range_from(text_range)
            .unwrap_or_default();
        Self {
            file: tree.file_name().map(str::to_owned),
            text_range,
            line_range,
        }
    }

    /// Returns the file, if known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the byte range.
    #[must_use]
    pub const fn text_range(&self) -> TextRange {
        self.text_range
    }

    /// Returns the line range.
    #[must_use]
    pub const fn line_range(&self) -> LineRange {
        self.line_range
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.line_range.start();
        let line = start.line().saturating_add(1);
        let column = start.offset().saturating_add(1);
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
        }
        write!(f, "{line}:{column}")
    }
}

/// Value of a structured diagnostic property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A text value.
    String(String),
    /// An integer value.
    Integer(i64),
}

/// A key/value pair attached to a diagnostic for tooling (code actions,
/// quick fixes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticProperty {
    key: String,
    value: PropertyValue,
}

impl DiagnosticProperty {
    /// Creates a text property.
    #[must_use]
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: PropertyValue::String(value.into()),
        }
    }

    /// Creates an integer property.
    #[must_use]
    pub fn integer(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: PropertyValue::Integer(value),
        }
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &PropertyValue {
        &self.value
    }
}

/// A rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    code: DiagnosticCode,
    severity: Severity,
    message: String,
    location: SourceLocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<DiagnosticProperty>,
}

impl Diagnostic {
    /// Renders `code` with `args` at `location`.
    ///
    /// A template/argument mismatch is logged and the raw template is kept
    /// so the diagnostic is never lost. Use [`Self::try_new`] to fail
    /// instead.
    #[must_use]
    pub fn new(code: DiagnosticCode, location: SourceLocation, args: &[&dyn fmt::Display]) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: render_message(code, args),
            location,
            properties: Vec::new(),
        }
    }

    /// Renders `code` with `args`, failing on a template mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the argument count does not match the
    /// template.
    pub fn try_new(
        code: DiagnosticCode,
        location: SourceLocation,
        args: &[&dyn fmt::Display],
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            code,
            severity: code.severity(),
            message: render_template(code.message_template(), args)?,
            location,
            properties: Vec::new(),
        })
    }

    /// Attaches structured properties.
    #[must_use]
    pub fn with_properties(mut self, properties: Vec<DiagnosticProperty>) -> Self {
        self.properties = properties;
        self
    }

    /// Returns the code.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Returns the structured properties.
    #[must_use]
    pub fn properties(&self) -> &[DiagnosticProperty] {
        &self.properties
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.code, self.location, self.message
        )
    }
}

/// Host-provided receiver of diagnostics.
pub trait DiagnosticSink {
    /// Accepts one diagnostic. Ownership passes to the host.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Front end that renders diagnostics and forwards them to a sink.
///
/// The reporter counts error-severity diagnostics so a caller can decide
/// whether the declaration it is analysing failed.
pub struct DiagnosticReporter<'s, S: DiagnosticSink + ?Sized> {
    sink: &'s mut S,
    errors: usize,
}

impl<'s, S: DiagnosticSink + ?Sized> DiagnosticReporter<'s, S> {
    /// Wraps a sink.
    pub const fn new(sink: &'s mut S) -> Self {
        Self { sink, errors: 0 }
    }

    /// Reports `code` with no template arguments.
    pub fn report(&mut self, location: SourceLocation, code: DiagnosticCode) {
        self.emit(Diagnostic::new(code, location, &[]));
    }

    /// Reports `code` with positional template arguments.
    pub fn report_with_args(
        &mut self,
        location: SourceLocation,
        code: DiagnosticCode,
        args: &[&dyn fmt::Display],
    ) {
        self.emit(Diagnostic::new(code, location, args));
    }

    /// Reports `code` with one template argument and structured properties.
    pub fn report_with_properties(
        &mut self,
        location: SourceLocation,
        code: DiagnosticCode,
        properties: Vec<DiagnosticProperty>,
        arg: &dyn fmt::Display,
    ) {
        self.emit(Diagnostic::new(code, location, &[arg]).with_properties(properties));
    }

    /// Forwards an already-built diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity() == Severity::Error {
            self.errors += 1;
        }
        tracing::debug!(
            code = diagnostic.code().code(),
            message = diagnostic.message(),
            "diagnostic reported"
        );
        self.sink.report(diagnostic);
    }

    /// Returns how many error-severity diagnostics were forwarded.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }
}
