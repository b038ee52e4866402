//! Deployment descriptor model and its `function.json` rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::constants::{AuthLevel, HTTP_PAYLOAD, HttpMethod, OutputBindingKind};

const HOST_JSON: &str = "host.json";
const FUNCTION_JSON: &str = "function.json";

/// Direction of a binding relative to the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Data flows into the function.
    In,
    /// Data flows out of the function.
    Out,
}

/// One entry of the `bindings` array in `function.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    #[serde(rename = "type")]
    binding_type: String,
    direction: Direction,
    name: String,
    #[serde(flatten)]
    properties: BTreeMap<String, Value>,
}

impl Binding {
    /// Creates the HTTP trigger binding.
    ///
    /// An empty `methods` list accepts every method and is omitted from the
    /// rendered binding.
    #[must_use]
    pub fn http_trigger(auth_level: AuthLevel, route: &str, methods: &[HttpMethod]) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("authLevel".to_owned(), json!(auth_level));
        properties.insert("route".to_owned(), json!(route));
        if !methods.is_empty() {
            properties.insert("methods".to_owned(), json!(methods));
        }
        Self {
            binding_type: "httpTrigger".to_owned(),
            direction: Direction::In,
            name: HTTP_PAYLOAD.to_owned(),
            properties,
        }
    }

    /// Creates an output binding of `kind` with the given string properties.
    #[must_use]
    pub fn output(kind: OutputBindingKind, properties: BTreeMap<String, String>) -> Self {
        Self {
            binding_type: kind.binding_type().to_owned(),
            direction: Direction::Out,
            name: kind.parameter_name().to_owned(),
            properties: properties
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        }
    }

    /// Returns the binding type.
    #[must_use]
    pub fn binding_type(&self) -> &str {
        &self.binding_type
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the binding name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Contents of one `function.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionJson {
    bindings: Vec<Binding>,
}

impl FunctionJson {
    /// Returns the bindings in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

/// A single generated function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    name: String,
    route: String,
    methods: Vec<HttpMethod>,
    auth_level: AuthLevel,
    output: Binding,
}

impl FunctionDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        route: impl Into<String>,
        methods: Vec<HttpMethod>,
        auth_level: AuthLevel,
        output: Binding,
    ) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            methods,
            auth_level,
            output,
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the route, without a leading slash.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the accepted methods. Empty means every method.
    #[must_use]
    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    /// Returns the trigger's authorization level.
    #[must_use]
    pub const fn auth_level(&self) -> AuthLevel {
        self.auth_level
    }

    /// Returns the output binding.
    #[must_use]
    pub const fn output(&self) -> &Binding {
        &self.output
    }

    /// Renders the function's `function.json`.
    #[must_use]
    pub fn function_json(&self) -> FunctionJson {
        FunctionJson {
            bindings: vec![
                Binding::http_trigger(self.auth_level, &self.route, &self.methods),
                self.output.clone(),
            ],
        }
    }
}

/// Functions generated from one service declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    base_path: String,
    functions: Vec<FunctionDescriptor>,
}

impl ServiceDescriptor {
    /// Creates a service descriptor.
    #[must_use]
    pub fn new(base_path: impl Into<String>, functions: Vec<FunctionDescriptor>) -> Self {
        Self {
            base_path: base_path.into(),
            functions,
        }
    }

    /// Returns the service's base path.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the generated functions.
    #[must_use]
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }
}

/// Serialized view of a whole function app.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppManifest {
    host: Value,
    functions: BTreeMap<String, FunctionJson>,
}

/// Errors raised while writing a bundle directory.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BundleError {
    /// A descriptor could not be serialized.
    #[error("failed to serialize {file}: {source}")]
    Serialize {
        /// File being rendered.
        file: String,
        /// Underlying error.
        #[source]
        source: Arc<serde_json::Error>,
    },
    /// A directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// A file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// All functions generated for a module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionApp {
    functions: Vec<FunctionDescriptor>,
}

impl FunctionApp {
    /// Creates an empty app.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Adds the functions of a service.
    pub fn extend(&mut self, service: ServiceDescriptor) {
        self.functions.extend(service.functions);
    }

    /// Returns every function in declaration order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    /// Returns `true` when no function was generated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Renders `host.json`.
    #[must_use]
    pub fn host_json() -> Value {
        json!({
            "version": "2.0",
            "extensions": {"http": {"routePrefix": ""}},
        })
    }

    /// Collects `host.json` and every `function.json`, keyed by function
    /// name.
    #[must_use]
    pub fn manifest(&self) -> AppManifest {
        AppManifest {
            host: Self::host_json(),
            functions: self
                .functions
                .iter()
                .map(|function| (function.name.clone(), function.function_json()))
                .collect(),
        }
    }

    /// Writes `host.json` and one `<name>/function.json` per function under
    /// `dir`, creating directories as needed. Existing files are replaced.
    ///
    /// Returns the written file paths in write order.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when serialization or any filesystem
    /// operation fails. Files written before the failure stay on disk.
    pub fn write_bundle(&self, dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
        create_dir(dir)?;
        let mut written = Vec::with_capacity(self.functions.len() + 1);
        written.push(write_json(&dir.join(HOST_JSON), &Self::host_json())?);
        for function in &self.functions {
            let function_dir = dir.join(&function.name);
            create_dir(&function_dir)?;
            written.push(write_json(
                &function_dir.join(FUNCTION_JSON),
                &function.function_json(),
            )?);
        }
        tracing::info!(dir = %dir.display(), files = written.len(), "wrote function bundle");
        Ok(written)
    }
}

fn create_dir(path: &Path) -> Result<(), BundleError> {
    fs::create_dir_all(path).map_err(|source| BundleError::CreateDirectory {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<PathBuf, BundleError> {
    let mut rendered =
        serde_json::to_string_pretty(value).map_err(|source| BundleError::Serialize {
            file: path.display().to_string(),
            source: Arc::new(source),
        })?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|source| BundleError::Write {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })?;
    Ok(path.to_path_buf())
}
