//! Unit tests for the syntax tree model and symbol locator.

use rstest::{fixture, rstest};

use crate::{
    LinePosition, LineRange, SourceTree, Symbol, SymbolLocation, SyntaxKind, SyntaxNode,
    SyntaxTree, TextDocument, TextRange, TreeBuildError, TreeBuilder, find_enclosing, locate,
};

/// Builds:
///
/// ```text
/// listener ep = new;
/// service /hello on ep {}
/// ```
#[fixture]
fn module() -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder
        .start_node(SyntaxKind::ModulePart)
        .start_node(SyntaxKind::ListenerDeclaration)
        .token(SyntaxKind::Keyword, "listener")
        .trivia(" ")
        .token(SyntaxKind::Identifier, "ep")
        .trivia(" = new;")
        .finish_node()
        .trivia("\n")
        .start_node(SyntaxKind::ServiceDeclaration)
        .token(SyntaxKind::Keyword, "service")
        .trivia(" ")
        .start_node(SyntaxKind::AbsoluteResourcePath)
        .token(SyntaxKind::SlashToken, "/")
        .token(SyntaxKind::Identifier, "hello")
        .finish_node()
        .trivia(" on ")
        .token(SyntaxKind::Identifier, "ep")
        .trivia(" {}")
        .finish_node()
        .finish_node();
    builder.finish().expect("well-formed tree")
}

fn symbol_at(name: &str, line: u32, start: u32, end: u32) -> Symbol {
    Symbol::new(name).with_location(SymbolLocation::new(LineRange::new(
        LinePosition::new(line, start),
        LinePosition::new(line, end),
    )))
}

#[rstest]
fn builder_derives_ranges_from_text(module: SyntaxTree) {
    let root = module.root();
    assert_eq!(root.kind(), SyntaxKind::ModulePart);
    assert_eq!(root.range(), TextRange::new(0, 42));

    let service = root
        .first_child_of_kind(SyntaxKind::ServiceDeclaration)
        .expect("service node");
    assert_eq!(service.range(), TextRange::new(19, 42));

    let path = service
        .first_child_of_kind(SyntaxKind::AbsoluteResourcePath)
        .expect("path node");
    assert_eq!(path.range(), TextRange::new(27, 33));
    assert_eq!(module.document().slice(path.range()), Some("/hello"));
}

#[rstest]
fn locate_returns_declaring_node(module: SyntaxTree) {
    let symbol = symbol_at("ep", 0, 9, 11);
    let node = locate(&module, &symbol).expect("listener located");
    assert_eq!(node.kind(), SyntaxKind::ListenerDeclaration);
}

#[rstest]
fn locate_prefers_innermost_enclosing_node(module: SyntaxTree) {
    let symbol = symbol_at("hello", 1, 9, 14);
    let node = locate(&module, &symbol).expect("path located");
    assert_eq!(node.kind(), SyntaxKind::AbsoluteResourcePath);
}

#[rstest]
fn locate_without_location_is_absent(module: SyntaxTree) {
    assert!(locate(&module, &Symbol::new("int")).is_none());
}

#[rstest]
#[case::missing_line(symbol_at("ghost", 7, 0, 1))]
#[case::offset_past_line_end(symbol_at("ghost", 0, 2, 40))]
fn locate_outside_document_is_absent(module: SyntaxTree, #[case] symbol: Symbol) {
    assert!(locate(&module, &symbol).is_none());
}

#[rstest]
fn find_enclosing_rejects_ranges_outside_root(module: SyntaxTree) {
    assert!(find_enclosing(module.root(), TextRange::new(40, 60)).is_none());
}

#[rstest]
#[case(LinePosition::new(0, 0), Some(0))]
#[case(LinePosition::new(0, 7), Some(7))]
#[case(LinePosition::new(0, 8), None)]
#[case(LinePosition::new(1, 6), Some(14))]
#[case(LinePosition::new(2, 0), None)]
fn text_position_from_line_position(
    #[case] position: LinePosition,
    #[case] expected: Option<usize>,
) {
    let document = TextDocument::new("service\n/hello");
    assert_eq!(document.text_position_from(position), expected);
}

#[test]
fn line_position_from_offset() {
    let document = TextDocument::new("service\n/hello");
    assert_eq!(
        document.line_position_from(9),
        Some(LinePosition::new(1, 1))
    );
    assert_eq!(
        document.line_position_from(7),
        Some(LinePosition::new(0, 7))
    );
    assert_eq!(document.line_position_from(15), None);
    assert_eq!(document.line_count(), 2);
}

#[rstest]
fn tree_survives_json_interchange(module: SyntaxTree) {
    let json = serde_json::to_string(&module).expect("serialize");
    let restored: SyntaxTree = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, module);
    assert_eq!(restored.document().line_count(), 2);
}

#[test]
fn unknown_kinds_deserialize_as_other() {
    let json = r#"{
        "source": "x",
        "root": {"kind": "lambda_expression", "range": {"start": 0, "end": 1}}
    }"#;
    let tree: SyntaxTree = serde_json::from_str(json).expect("deserialize");
    assert_eq!(tree.root().kind(), SyntaxKind::Other);
    assert!(tree.root().children().is_empty());
}

#[test]
fn builder_rejects_token_outside_node() {
    let mut builder = TreeBuilder::new();
    builder.token(SyntaxKind::Identifier, "stray");
    assert_eq!(
        builder.finish().expect_err("orphan token"),
        TreeBuildError::TokenOutsideNode {
            kind: SyntaxKind::Identifier
        }
    );
}

#[test]
fn builder_rejects_unbalanced_finish() {
    let mut builder = TreeBuilder::new();
    builder.finish_node();
    assert_eq!(
        builder.finish().expect_err("unbalanced"),
        TreeBuildError::UnbalancedFinish
    );
}

#[test]
fn builder_rejects_unclosed_nodes() {
    let mut builder = TreeBuilder::new();
    builder
        .start_node(SyntaxKind::ModulePart)
        .start_node(SyntaxKind::ServiceDeclaration);
    assert_eq!(
        builder.finish().expect_err("unclosed"),
        TreeBuildError::UnclosedNodes { open: 2 }
    );
}

#[test]
fn builder_rejects_second_root() {
    let mut builder = TreeBuilder::new();
    builder
        .start_node(SyntaxKind::ModulePart)
        .finish_node()
        .start_node(SyntaxKind::ModulePart)
        .finish_node();
    assert_eq!(
        builder.finish().expect_err("two roots"),
        TreeBuildError::MultipleRoots {
            kind: SyntaxKind::ModulePart
        }
    );
}

#[test]
fn empty_builder_has_no_root() {
    assert_eq!(
        TreeBuilder::new().finish().expect_err("empty"),
        TreeBuildError::Empty
    );
}
