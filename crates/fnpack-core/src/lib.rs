//! Annotation extraction, validation, and descriptor assembly for serverless
//! function apps.
//!
//! The pipeline walks a service declaration handed over by the host
//! compiler, pulls literal values out of its annotations, resolves resource
//! paths, reports problems through a [`DiagnosticSink`], and assembles a
//! [`ServiceDescriptor`] that renders to `function.json` files.
//!
//! # Core pieces
//!
//! - [`extract_field_value`] - static value of one annotation field
//! - [`resolve_resource_path`] and [`PathResolver`] - resource path strings
//! - [`DiagnosticCode`] and [`DiagnosticReporter`] - the fixed diagnostic
//!   table and the reporting front end
//! - [`analyze_service`] and [`analyze_module`] - the extraction pipeline
//! - [`FunctionApp`] - descriptor rendering and bundle output
//!
//! # Example
//!
//! ```
//! use fnpack_core::{AnalysisConfig, SymbolTable, analyze_module};
//! use fnpack_syntax::SyntaxTree;
//!
//! # fn run(tree: &SyntaxTree) {
//! let mut diagnostics = Vec::new();
//! let app = analyze_module(tree, &AnalysisConfig::default(), &SymbolTable::default(), &mut diagnostics);
//! for function in app.functions() {
//!     let _ = function.route();
//! }
//! # }
//! ```

pub mod constants;
mod config;
mod descriptor;
mod diagnostic;
mod error;
mod extract;
mod path;
mod pipeline;

pub use config::AnalysisConfig;
pub use descriptor::{
    AppManifest, Binding, BundleError, Direction, FunctionApp, FunctionDescriptor, FunctionJson,
    ServiceDescriptor,
};
pub use diagnostic::{
    Diagnostic, DiagnosticCode, DiagnosticProperty, DiagnosticReporter, DiagnosticSink,
    PropertyValue, Severity, SourceLocation, TemplateError, render_template,
};
pub use error::{ExtractError, FunctionsError, PathError};
pub use extract::{AnnotationField, FieldValueKind, extract_field_value, field_name};
pub use path::{PathResolver, ResourcePathSegment, join_segments, resolve_resource_path};
pub use pipeline::{ServiceContext, SymbolTable, analyze_module, analyze_service};

#[cfg(test)]
mod tests;
