//! Fixture trees and an in-memory runner.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fnpack_syntax::{SyntaxKind, SyntaxTree, TreeBuilder};

/// Captured result of one CLI invocation.
pub(super) struct Outcome {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

pub(super) fn run_cli(args: &[&str]) -> Outcome {
    let argv = std::iter::once("fnpack")
        .chain(args.iter().copied())
        .map(OsString::from);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = crate::run(argv, &mut stdout, &mut stderr);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

/// A module with one `hello` service carrying an `authLevel` trigger and a
/// `get hi` resource.
pub(super) fn hello_module(auth_level: &str) -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder
        .start_node(SyntaxKind::ModulePart)
        .start_node(SyntaxKind::ServiceDeclaration)
        .start_node(SyntaxKind::Annotation)
        .trivia("@")
        .start_node(SyntaxKind::AnnotationReference)
        .token(SyntaxKind::Identifier, "af")
        .token(SyntaxKind::ColonToken, ":")
        .token(SyntaxKind::Identifier, "HttpTrigger")
        .finish_node()
        .trivia(" ")
        .start_node(SyntaxKind::MappingConstructor)
        .trivia("{")
        .start_node(SyntaxKind::SpecificField)
        .token(SyntaxKind::Identifier, "authLevel")
        .token(SyntaxKind::ColonToken, ":")
        .trivia(" ")
        .token(SyntaxKind::StringLiteral, &format!("\"{auth_level}\""))
        .finish_node()
        .trivia("}")
        .finish_node()
        .finish_node()
        .trivia("\n")
        .token(SyntaxKind::Keyword, "service")
        .trivia(" ")
        .start_node(SyntaxKind::AbsoluteResourcePath)
        .token(SyntaxKind::SlashToken, "/")
        .token(SyntaxKind::Identifier, "hello")
        .finish_node()
        .trivia(" {\n    ")
        .start_node(SyntaxKind::ResourceAccessorDefinition)
        .token(SyntaxKind::Keyword, "resource")
        .trivia(" ")
        .token(SyntaxKind::Keyword, "function")
        .trivia(" ")
        .token(SyntaxKind::Identifier, "get")
        .trivia(" ")
        .start_node(SyntaxKind::RelativeResourcePath)
        .token(SyntaxKind::Identifier, "hi")
        .finish_node()
        .trivia("() {}")
        .finish_node()
        .trivia("\n}")
        .finish_node()
        .finish_node();
    builder
        .finish()
        .expect("fixture tree is well formed")
        .with_file("main.bal")
}

pub(super) fn write_tree(dir: &Path, tree: &SyntaxTree) -> PathBuf {
    let path = dir.join("tree.json");
    let json = serde_json::to_string(tree).expect("serialize tree");
    std::fs::write(&path, json).expect("write tree");
    path
}
