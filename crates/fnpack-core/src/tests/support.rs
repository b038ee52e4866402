//! Builders for the syntax trees the pipeline tests analyse.

use fnpack_syntax::{
    SourceTree, Symbol, SymbolLocation, SyntaxKind, SyntaxNode, SyntaxTree, TreeBuilder,
    TreeNode,
};

/// A field value: its kind and exact source text.
pub(crate) type Value = (SyntaxKind, String);

/// An annotation field; `None` leaves the field without a value.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub key: String,
    pub value: Option<Value>,
}

/// An annotation with its name and fields.
#[derive(Debug, Clone)]
pub(crate) struct Annotation {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Resource {
    pub accessor: String,
    pub path: Vec<Value>,
    pub outputs: Vec<Annotation>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Service {
    pub annotations: Vec<Annotation>,
    pub type_name: Option<String>,
    pub base_path: Vec<Value>,
    pub listener: Option<String>,
    pub resources: Vec<Resource>,
}

pub(crate) fn string(text: &str) -> Value {
    (SyntaxKind::StringLiteral, format!("\"{text}\""))
}

pub(crate) fn integer(text: &str) -> Value {
    (SyntaxKind::DecimalIntegerLiteral, text.to_owned())
}

pub(crate) fn ident(text: &str) -> Value {
    (SyntaxKind::Identifier, text.to_owned())
}

pub(crate) fn slash() -> Value {
    (SyntaxKind::SlashToken, String::from("/"))
}

pub(crate) fn call(text: &str) -> Value {
    (SyntaxKind::FunctionCall, text.to_owned())
}

pub(crate) fn field(key: &str, value: Value) -> Field {
    Field {
        key: key.to_owned(),
        value: Some(value),
    }
}

pub(crate) fn annotation(name: &str, fields: Vec<Field>) -> Annotation {
    Annotation {
        name: name.to_owned(),
        fields,
    }
}

/// Splits `a/b` into identifier and slash segments.
pub(crate) fn path(text: &str) -> Vec<Value> {
    let mut segments = Vec::new();
    for (index, part) in text.split('/').enumerate() {
        if index > 0 {
            segments.push(slash());
        }
        if !part.is_empty() {
            segments.push(ident(part));
        }
    }
    segments
}

pub(crate) fn resource(accessor: &str, route: &str) -> Resource {
    Resource {
        accessor: accessor.to_owned(),
        path: path(route),
        outputs: Vec::new(),
    }
}

/// Accumulates a module: optional listeners followed by services.
pub(crate) struct ModuleSource {
    builder: TreeBuilder,
}

impl ModuleSource {
    pub(crate) fn new() -> Self {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::ModulePart);
        Self { builder }
    }

    pub(crate) fn listener(&mut self, name: &str, annotations: &[Annotation]) -> &mut Self {
        self.builder.start_node(SyntaxKind::ListenerDeclaration);
        for entry in annotations {
            write_annotation(&mut self.builder, entry);
            self.builder.trivia("\n");
        }
        self.builder
            .token(SyntaxKind::Keyword, "listener")
            .trivia(" ")
            .token(SyntaxKind::Identifier, name)
            .trivia(" = new;")
            .finish_node()
            .trivia("\n");
        self
    }

    pub(crate) fn service(&mut self, service: &Service) -> &mut Self {
        let builder = &mut self.builder;
        builder.start_node(SyntaxKind::ServiceDeclaration);
        for entry in &service.annotations {
            write_annotation(builder, entry);
            builder.trivia("\n");
        }
        builder.token(SyntaxKind::Keyword, "service").trivia(" ");
        if let Some(type_name) = &service.type_name {
            builder.token(SyntaxKind::Identifier, type_name).trivia(" ");
        }
        if !service.base_path.is_empty() {
            builder.start_node(SyntaxKind::AbsoluteResourcePath);
            write_segments(builder, &service.base_path);
            builder.finish_node();
        }
        if let Some(listener) = &service.listener {
            builder
                .trivia(" ")
                .token(SyntaxKind::Keyword, "on")
                .trivia(" ")
                .token(SyntaxKind::Identifier, listener);
        }
        builder.trivia(" {\n");
        for entry in &service.resources {
            write_resource(builder, entry);
        }
        builder.trivia("}").finish_node().trivia("\n");
        self
    }

    pub(crate) fn finish(mut self) -> SyntaxTree {
        self.builder.finish_node();
        self.builder
            .finish()
            .expect("test module is well formed")
            .with_file("main.bal")
    }
}

fn write_segments(builder: &mut TreeBuilder, segments: &[Value]) {
    for (kind, text) in segments {
        write_value(builder, *kind, text);
    }
}

fn write_value(builder: &mut TreeBuilder, kind: SyntaxKind, text: &str) {
    match kind {
        SyntaxKind::FunctionCall | SyntaxKind::TemplateExpression => {
            builder
                .start_node(kind)
                .token(SyntaxKind::Identifier, text)
                .trivia("()")
                .finish_node();
        }
        _ => {
            builder.token(kind, text);
        }
    }
}

fn write_annotation(builder: &mut TreeBuilder, entry: &Annotation) {
    builder
        .start_node(SyntaxKind::Annotation)
        .trivia("@")
        .start_node(SyntaxKind::AnnotationReference)
        .token(SyntaxKind::Identifier, "af")
        .token(SyntaxKind::ColonToken, ":")
        .token(SyntaxKind::Identifier, &entry.name)
        .finish_node();
    if !entry.fields.is_empty() {
        builder
            .trivia(" ")
            .start_node(SyntaxKind::MappingConstructor)
            .trivia("{");
        for (index, field) in entry.fields.iter().enumerate() {
            if index > 0 {
                builder.trivia(", ");
            }
            builder
                .start_node(SyntaxKind::SpecificField)
                .token(SyntaxKind::Identifier, &field.key);
            if let Some((kind, text)) = &field.value {
                builder.token(SyntaxKind::ColonToken, ":").trivia(" ");
                write_value(builder, *kind, text);
            }
            builder.finish_node();
        }
        builder.trivia("}").finish_node();
    }
    builder.finish_node();
}

fn write_resource(builder: &mut TreeBuilder, entry: &Resource) {
    builder
        .trivia("    ")
        .start_node(SyntaxKind::ResourceAccessorDefinition)
        .token(SyntaxKind::Keyword, "resource")
        .trivia(" ")
        .token(SyntaxKind::Keyword, "function")
        .trivia(" ")
        .token(SyntaxKind::Identifier, &entry.accessor)
        .trivia(" ");
    if !entry.path.is_empty() {
        builder.start_node(SyntaxKind::RelativeResourcePath);
        write_segments(builder, &entry.path);
        builder.finish_node();
    }
    builder.trivia("()");
    if !entry.outputs.is_empty() {
        builder
            .trivia(" returns ")
            .start_node(SyntaxKind::ReturnTypeDescriptor);
        for output in &entry.outputs {
            write_annotation(builder, output);
            builder.trivia(" ");
        }
        builder
            .token(SyntaxKind::Keyword, "string")
            .finish_node();
    }
    builder.trivia(" {}").finish_node().trivia("\n");
}

/// Resolves the symbol of a listener declared in `tree`, as the host's
/// symbol table would.
pub(crate) fn listener_symbol(tree: &SyntaxTree, name: &str) -> Symbol {
    let token = find_token(tree.root(), SyntaxKind::ListenerDeclaration, name)
        .expect("listener declared in tree");
    let line_range = tree
        .document()
        .line_range_from(token.range())
        .expect("token inside document");
    Symbol::new(name).with_location(SymbolLocation::new(line_range).with_file("main.bal"))
}

fn find_token<'t>(node: &'t TreeNode, parent: SyntaxKind, name: &str) -> Option<&'t TreeNode> {
    node.children().into_iter().find_map(|child| {
        if node.kind() == parent
            && child.kind() == SyntaxKind::Identifier
            && child.token_text() == Some(name)
        {
            return Some(child);
        }
        find_token(child, parent, name)
    })
}

/// Returns the first service declaration of `tree`.
pub(crate) fn first_service(tree: &SyntaxTree) -> &TreeNode {
    tree.root()
        .first_child_of_kind(SyntaxKind::ServiceDeclaration)
        .expect("service declared")
}
