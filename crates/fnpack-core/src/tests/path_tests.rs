//! Tests for resource path resolution.

use fnpack_syntax::{SourceTree, SyntaxKind, SyntaxNode, SyntaxTree, TextRange, TreeBuilder};
use rstest::rstest;

use super::support::{Value, ident, path, slash, string};
use crate::{PathError, PathResolver, ResourcePathSegment, join_segments, resolve_resource_path};

fn path_tree(segments: &[Value]) -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder.start_node(SyntaxKind::RelativeResourcePath);
    for (kind, text) in segments {
        if *kind == SyntaxKind::TemplateExpression {
            builder
                .start_node(*kind)
                .trivia("${")
                .token(SyntaxKind::Identifier, text)
                .trivia("}")
                .finish_node();
        } else {
            builder.token(*kind, text);
        }
    }
    builder.finish_node();
    builder.finish().expect("well-formed path")
}

fn template(text: &str) -> Value {
    (SyntaxKind::TemplateExpression, text.to_owned())
}

#[rstest]
#[case::identifiers(vec![ident("a"), slash(), ident("b")], "a/b")]
#[case::leading_slash_literal(vec![string("/x"), ident("y")], "x/y")]
#[case::leading_slash_token(path("/hello/hi"), "hello/hi")]
#[case::single_identifier(vec![ident("hello")], "hello")]
#[case::only_one_slash_stripped(vec![slash(), slash(), ident("a")], "/a")]
#[case::empty(Vec::new(), "")]
fn resolves_segments(#[case] segments: Vec<Value>, #[case] expected: &str) {
    let tree = path_tree(&segments);
    assert_eq!(resolve_resource_path(tree.root().children()), expected);
    assert_eq!(
        PathResolver::strict()
            .resolve(tree.root().children())
            .expect("resolvable"),
        expected
    );
}

#[test]
fn lenient_resolution_skips_interpolation() {
    let tree = path_tree(&[ident("a"), slash(), template("id"), ident("b")]);
    assert_eq!(resolve_resource_path(tree.root().children()), "a/b");
    assert_eq!(
        PathResolver::lenient()
            .resolve(tree.root().children())
            .expect("lenient never fails"),
        "a/b"
    );
}

#[test]
fn strict_resolution_rejects_interpolation() {
    let tree = path_tree(&[ident("a"), slash(), template("id")]);
    let error = PathResolver::strict()
        .resolve(tree.root().children())
        .expect_err("interpolation is unsupported");
    assert_eq!(
        error,
        PathError::UnsupportedSegment {
            kind: SyntaxKind::TemplateExpression,
            range: TextRange::new(2, 7),
        }
    );
    assert_eq!(error.kind(), SyntaxKind::TemplateExpression);
}

#[test]
fn resolved_paths_are_fixed_points() {
    let first = path_tree(&path("/orders/today"));
    let resolved = resolve_resource_path(first.root().children());
    let second = path_tree(&[ident(&resolved)]);
    assert_eq!(resolve_resource_path(second.root().children()), resolved);
}

#[test]
fn segments_join_in_order() {
    let segments = [
        ResourcePathSegment::Slash,
        ResourcePathSegment::Literal(String::from("v1")),
        ResourcePathSegment::Slash,
        ResourcePathSegment::Identifier(String::from("users")),
    ];
    assert_eq!(join_segments(&segments), "v1/users");
}

#[test]
fn classifies_path_nodes() {
    let tree = path_tree(&[string("x"), slash(), ident("y"), template("z")]);
    let segments: Vec<_> = tree
        .root()
        .children()
        .into_iter()
        .map(ResourcePathSegment::from_node)
        .collect();
    assert_eq!(
        segments,
        vec![
            Some(ResourcePathSegment::Literal(String::from("x"))),
            Some(ResourcePathSegment::Slash),
            Some(ResourcePathSegment::Identifier(String::from("y"))),
            None,
        ]
    );
}
