//! Service declaration analysis.
//!
//! A service declaration is expected to look like this:
//!
//! ```text
//! ServiceDeclaration
//!   Annotation*                  trigger annotations
//!   Identifier?                  service type
//!   AbsoluteResourcePath?        base path
//!   (Keyword(on) Identifier)?    listener reference
//!   ResourceAccessorDefinition*
//!     Identifier                 accessor (get, post, ...)
//!     RelativeResourcePath?
//!     ReturnTypeDescriptor?
//!       Annotation*              output bindings
//! ```
//!
//! Problems that leave the declaration analysable are reported and the walk
//! continues. Problems that make the rest of the declaration meaningless
//! unwind as [`FunctionsError`]; the entry points report the carried
//! diagnostic and drop that one declaration.

use std::collections::{BTreeMap, BTreeSet};

use fnpack_syntax::{SourceTree, Symbol, SyntaxKind, SyntaxNode, locate};

use crate::config::AnalysisConfig;
use crate::constants::{AUTH_LEVEL, AuthLevel, HTTP_TRIGGER, HttpMethod, OutputBindingKind};
use crate::descriptor::{Binding, FunctionApp, FunctionDescriptor, ServiceDescriptor};
use crate::diagnostic::{
    Diagnostic, DiagnosticCode, DiagnosticProperty, DiagnosticReporter, DiagnosticSink,
    SourceLocation,
};
use crate::error::FunctionsError;
use crate::extract::{extract_field_value, field_name};
use crate::path::PathResolver;

const ON_KEYWORD: &str = "on";

/// Host-resolved facts about a service declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceContext {
    listener: Option<Symbol>,
}

impl ServiceContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self { listener: None }
    }

    /// Records the symbol of the listener the service is attached to.
    #[must_use]
    pub fn with_listener(mut self, listener: Symbol) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Returns the listener symbol, if resolved.
    #[must_use]
    pub const fn listener(&self) -> Option<&Symbol> {
        self.listener.as_ref()
    }
}

/// Resolved module-level symbols, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    /// Adds a symbol, returning any previous symbol with the same name.
    pub fn insert(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(symbol.name().to_owned(), symbol)
    }

    /// Looks up a symbol by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` when the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.insert(symbol);
        }
        table
    }
}

/// Analyses one service declaration.
///
/// Every diagnostic is forwarded to `sink`. Returns `None` when any
/// error-severity diagnostic was reported for the declaration.
pub fn analyze_service<'t, T, S>(
    tree: &'t T,
    service: T::Node<'t>,
    config: &AnalysisConfig,
    context: &ServiceContext,
    sink: &mut S,
) -> Option<ServiceDescriptor>
where
    T: SourceTree,
    S: DiagnosticSink + ?Sized,
{
    analyze_declaration(tree, service, config, context, &Claims::default(), sink)
}

/// Analyses every service declared directly under the root of `tree`.
///
/// The listener a service is attached to is looked up in `symbols` by name.
/// A failing declaration is skipped; the others are still analysed. Each
/// method and route pair may be served once across the whole module; distinct
/// routes whose derived names clash are given numeric suffixes.
pub fn analyze_module<T, S>(
    tree: &T,
    config: &AnalysisConfig,
    symbols: &SymbolTable,
    sink: &mut S,
) -> FunctionApp
where
    T: SourceTree,
    S: DiagnosticSink + ?Sized,
{
    let mut app = FunctionApp::new();
    let mut taken = Claims::default();
    for service in tree.root().children_of_kind(SyntaxKind::ServiceDeclaration) {
        let mut context = ServiceContext::new();
        if let Some(listener) = listener_name(service).and_then(|name| symbols.get(&name)) {
            context = context.with_listener(listener.clone());
        }
        let Some(descriptor) = analyze_declaration(tree, service, config, &context, &taken, sink)
        else {
            tracing::debug!(range = ?service.range(), "service declaration skipped");
            continue;
        };
        for function in descriptor.functions() {
            taken.record(function);
        }
        app.extend(descriptor);
    }
    app
}

fn analyze_declaration<'t, T, S>(
    tree: &'t T,
    service: T::Node<'t>,
    config: &AnalysisConfig,
    context: &ServiceContext,
    taken: &Claims,
    sink: &mut S,
) -> Option<ServiceDescriptor>
where
    T: SourceTree,
    S: DiagnosticSink + ?Sized,
{
    let mut reporter = DiagnosticReporter::new(sink);
    let analysis = ServiceAnalysis {
        tree,
        config,
        resolver: PathResolver::new(config.strict_paths()),
        taken,
    };
    match analysis.run(service, context, &mut reporter) {
        Ok(descriptor) if reporter.error_count() == 0 => Some(descriptor),
        Ok(_) => None,
        Err(error) => {
            reporter.emit(error.into_diagnostic());
            None
        }
    }
}

struct ServiceAnalysis<'t, 'c, T> {
    tree: &'t T,
    config: &'c AnalysisConfig,
    resolver: PathResolver,
    taken: &'c Claims,
}

/// Function names and endpoints already generated for a module.
#[derive(Debug, Clone, Default)]
struct Claims {
    names: BTreeSet<String>,
    endpoints: BTreeSet<(&'static str, String)>,
}

impl Claims {
    fn record(&mut self, function: &FunctionDescriptor) {
        let route = function.route();
        if function.methods().is_empty() {
            self.endpoints
                .insert((HttpMethod::Default.as_str(), route.to_owned()));
        }
        for method in function.methods() {
            self.endpoints.insert((method.as_str(), route.to_owned()));
        }
        self.names.insert(function.name().to_owned());
    }

    /// Claims the endpoint and a unique function name for it, suffixing `-2`,
    /// `-3`, ... when distinct routes derive the same name. Returns `None`
    /// when the endpoint is already served.
    fn claim(&mut self, method: HttpMethod, route: &str) -> Option<String> {
        if !self.endpoints.insert((method.as_str(), route.to_owned())) {
            return None;
        }
        let base = function_name(method, route);
        let mut name = base.clone();
        let mut suffix = 1_usize;
        while self.names.contains(&name) {
            suffix += 1;
            name = format!("{base}-{suffix}");
        }
        self.names.insert(name.clone());
        Some(name)
    }
}

impl<'t, T: SourceTree> ServiceAnalysis<'t, '_, T> {
    fn run<S: DiagnosticSink + ?Sized>(
        &self,
        service: T::Node<'t>,
        context: &ServiceContext,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<ServiceDescriptor, FunctionsError> {
        let auth_level = self.auth_level(service, context, reporter)?;
        let base_path = service
            .first_child_of_kind(SyntaxKind::AbsoluteResourcePath)
            .map(|path| self.resolve_path(path))
            .transpose()?
            .unwrap_or_default();
        tracing::debug!(%base_path, %auth_level, "analysing service");

        let accessors = service.children_of_kind(SyntaxKind::ResourceAccessorDefinition);
        if accessors.is_empty() {
            reporter.report_with_args(
                SourceLocation::of(self.tree, service),
                DiagnosticCode::NoResourceFunctions,
                &[&format!("/{base_path}")],
            );
        }

        let mut claims = self.taken.clone();
        let mut functions = Vec::with_capacity(accessors.len());
        for accessor in accessors {
            if let Some(function) =
                self.function(accessor, &base_path, auth_level, &mut claims, reporter)?
            {
                functions.push(function);
            }
        }
        Ok(ServiceDescriptor::new(base_path, functions))
    }

    fn auth_level<S: DiagnosticSink + ?Sized>(
        &self,
        service: T::Node<'t>,
        context: &ServiceContext,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<AuthLevel, FunctionsError> {
        let Some(field) = self
            .trigger_annotation(service, context)
            .and_then(|trigger| find_field(trigger, AUTH_LEVEL))
        else {
            return Ok(AuthLevel::default());
        };
        let Some(value) = self.read_field(field, reporter)? else {
            return Ok(AuthLevel::default());
        };
        match value.parse::<AuthLevel>() {
            Ok(level) => Ok(level),
            Err(_) => {
                reporter.emit(
                    Diagnostic::new(
                        DiagnosticCode::InvalidFieldValue,
                        SourceLocation::of(self.tree, field),
                        &[&value, &AUTH_LEVEL],
                    )
                    .with_properties(vec![DiagnosticProperty::string(
                        "allowed",
                        AuthLevel::ALLOWED.join(", "),
                    )]),
                );
                Ok(AuthLevel::default())
            }
        }
    }

    /// The service's own trigger wins over the listener's.
    fn trigger_annotation(
        &self,
        service: T::Node<'t>,
        context: &ServiceContext,
    ) -> Option<T::Node<'t>> {
        find_annotation(service, HTTP_TRIGGER).or_else(|| {
            let symbol = context.listener()?;
            let listener = locate(self.tree, symbol)?;
            tracing::debug!(listener = symbol.name(), "reading trigger from listener");
            find_annotation(listener, HTTP_TRIGGER)
        })
    }

    fn function<N: SyntaxNode, S: DiagnosticSink + ?Sized>(
        &self,
        accessor: N,
        base_path: &str,
        auth_level: AuthLevel,
        claims: &mut Claims,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<Option<FunctionDescriptor>, FunctionsError> {
        let Some(accessor_token) = accessor.first_child_of_kind(SyntaxKind::Identifier) else {
            tracing::debug!(range = ?accessor.range(), "resource accessor has no name");
            return Ok(None);
        };
        let accessor_name = accessor_token.token_text().unwrap_or_default();
        let Ok(method) = accessor_name.parse::<HttpMethod>() else {
            reporter.report_with_properties(
                SourceLocation::of(self.tree, accessor_token),
                DiagnosticCode::UnsupportedAccessor,
                vec![DiagnosticProperty::string("accessor", accessor_name)],
                &accessor_name,
            );
            return Ok(None);
        };

        let relative = accessor
            .first_child_of_kind(SyntaxKind::RelativeResourcePath)
            .map(|path| self.resolve_path(path))
            .transpose()?
            .unwrap_or_default();
        let route = join_route(base_path, &relative);
        let Some(name) = claims.claim(method, &route) else {
            reporter.report_with_properties(
                SourceLocation::of(self.tree, accessor),
                DiagnosticCode::DuplicateFunctionName,
                vec![DiagnosticProperty::string("route", route.as_str())],
                &function_name(method, &route),
            );
            return Ok(None);
        };

        let output = self.output_binding(accessor, reporter)?;
        let methods = if method.is_wildcard() {
            Vec::new()
        } else {
            vec![method]
        };
        if self.config.report_generated() {
            reporter.report_with_args(
                SourceLocation::of(self.tree, accessor),
                DiagnosticCode::FunctionGenerated,
                &[&name, &route],
            );
        }
        Ok(Some(FunctionDescriptor::new(
            name, route, methods, auth_level, output,
        )))
    }

    /// The first recognised output annotation wins; unknown ones are
    /// reported and skipped.
    fn output_binding<N: SyntaxNode, S: DiagnosticSink + ?Sized>(
        &self,
        accessor: N,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<Binding, FunctionsError> {
        let annotations = accessor
            .first_child_of_kind(SyntaxKind::ReturnTypeDescriptor)
            .map(|return_type| return_type.children_of_kind(SyntaxKind::Annotation))
            .unwrap_or_default();
        let mut binding = None;
        for annotation in annotations {
            let name = annotation_name(annotation).unwrap_or_default();
            match OutputBindingKind::from_annotation(&name) {
                Some(kind) if binding.is_none() => {
                    binding = Some(self.output_for(kind, annotation, reporter)?);
                }
                Some(_) => tracing::debug!(annotation = %name, "extra output binding ignored"),
                None => reporter.report_with_args(
                    SourceLocation::of(self.tree, annotation),
                    DiagnosticCode::UnknownOutputBinding,
                    &[&name],
                ),
            }
        }
        Ok(binding.unwrap_or_else(|| Binding::output(OutputBindingKind::Http, BTreeMap::new())))
    }

    fn output_for<N: SyntaxNode, S: DiagnosticSink + ?Sized>(
        &self,
        kind: OutputBindingKind,
        annotation: N,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<Binding, FunctionsError> {
        let mut properties = BTreeMap::new();
        for &key in kind.required_fields() {
            let Some(field) = find_field(annotation, key) else {
                reporter.report_with_args(
                    SourceLocation::of(self.tree, annotation),
                    DiagnosticCode::MissingRequiredField,
                    &[&key, &kind.annotation_name()],
                );
                continue;
            };
            if let Some(value) = self.read_field(field, reporter)? {
                properties.insert(key.to_owned(), value);
            }
        }
        for &(key, default) in kind.optional_fields() {
            let value = find_field(annotation, key)
                .map(|field| self.read_field(field, reporter))
                .transpose()?
                .flatten();
            properties.insert(key.to_owned(), value.unwrap_or_else(|| default.to_owned()));
        }
        Ok(Binding::output(kind, properties))
    }

    /// Reads a field's static value, reporting non-literal values.
    fn read_field<N: SyntaxNode, S: DiagnosticSink + ?Sized>(
        &self,
        field: N,
        reporter: &mut DiagnosticReporter<'_, S>,
    ) -> Result<Option<String>, FunctionsError> {
        let name = field_name(field).unwrap_or_default();
        match extract_field_value(field) {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => {
                reporter.report_with_args(
                    SourceLocation::of(self.tree, field),
                    DiagnosticCode::UnsupportedFieldValue,
                    &[&name],
                );
                Ok(None)
            }
            Err(error) => Err(FunctionsError::with_source(
                Diagnostic::new(
                    DiagnosticCode::MissingFieldValue,
                    SourceLocation::of(self.tree, field),
                    &[&name],
                ),
                error,
            )),
        }
    }

    fn resolve_path<N: SyntaxNode>(&self, path: N) -> Result<String, FunctionsError> {
        self.resolver.resolve(path.children()).map_err(|error| {
            let diagnostic = Diagnostic::new(
                DiagnosticCode::UnsupportedPathSegment,
                SourceLocation::from_range(self.tree, error.range()),
                &[&error.kind()],
            );
            FunctionsError::with_source(diagnostic, error)
        })
    }
}

/// Returns the last identifier of an annotation's (possibly qualified)
/// reference, e.g. `HttpTrigger` for `@af:HttpTrigger`.
fn annotation_name<N: SyntaxNode>(annotation: N) -> Option<String> {
    let reference = annotation
        .first_child_of_kind(SyntaxKind::AnnotationReference)
        .unwrap_or(annotation);
    reference
        .children_of_kind(SyntaxKind::Identifier)
        .last()
        .and_then(|identifier| identifier.token_text().map(str::to_owned))
}

fn find_annotation<N: SyntaxNode>(node: N, name: &str) -> Option<N> {
    node.children_of_kind(SyntaxKind::Annotation)
        .into_iter()
        .find(|annotation| annotation_name(*annotation).as_deref() == Some(name))
}

fn find_field<N: SyntaxNode>(annotation: N, name: &str) -> Option<N> {
    annotation
        .first_child_of_kind(SyntaxKind::MappingConstructor)?
        .children_of_kind(SyntaxKind::SpecificField)
        .into_iter()
        .find(|field| field_name(*field).as_deref() == Some(name))
}

/// Returns the first identifier after the `on` keyword of a service, e.g.
/// `ep` for `service HelloService /hello on ep`.
fn listener_name<N: SyntaxNode>(service: N) -> Option<String> {
    service
        .children()
        .into_iter()
        .skip_while(|child| {
            child.kind() != SyntaxKind::Keyword || child.token_text() != Some(ON_KEYWORD)
        })
        .skip(1)
        .find(|child| child.kind() == SyntaxKind::Identifier)
        .and_then(|identifier| identifier.token_text().map(str::to_owned))
}

fn join_route(base_path: &str, relative: &str) -> String {
    [base_path, relative]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Derives a function name from the accessor and route, e.g. `get-hello-hi`
/// for `get` on `hello/hi`.
fn function_name(method: HttpMethod, route: &str) -> String {
    let mut name = method.as_str().to_owned();
    if route.is_empty() {
        return name;
    }
    name.push('-');
    name.extend(route.chars().map(|ch| match ch {
        '/' => '-',
        'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => ch,
        _ => '_',
    }));
    name
}
