//! Implementations of the `describe` and `unpack` subcommands.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use fnpack_archive::extract_archive;
use fnpack_config::Config;
use fnpack_core::{Diagnostic, Severity, SymbolTable, analyze_module};
use fnpack_syntax::{Symbol, SyntaxTree};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::AppError;
use crate::cli::{DescribeArgs, UnpackArgs};

/// Analyses a module and emits its function app.
///
/// Diagnostics are written to `stderr` in report order. When any of them is
/// an error nothing is emitted and the command fails.
pub(crate) fn describe<W, E>(
    args: &DescribeArgs,
    config: &Config,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    let tree: SyntaxTree = read_json(&args.tree)?;
    let symbols: SymbolTable = match &args.symbols {
        Some(path) => read_json::<Vec<Symbol>>(path)?.into_iter().collect(),
        None => SymbolTable::new(),
    };

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let app = analyze_module(&tree, &config.analysis(), &symbols, &mut diagnostics);
    for diagnostic in &diagnostics {
        writeln!(stderr, "{diagnostic}").map_err(AppError::WriteOutput)?;
    }

    let errors = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity() == Severity::Error)
        .count();
    if errors > 0 {
        writeln!(stderr, "{errors} error(s) reported; no descriptors emitted")
            .map_err(AppError::WriteOutput)?;
        return Ok(ExitCode::FAILURE);
    }

    match &args.out {
        Some(directory) => {
            for path in app.write_bundle(directory)? {
                writeln!(stdout, "{}", path.display()).map_err(AppError::WriteOutput)?;
            }
        }
        None => {
            serde_json::to_writer_pretty(&mut *stdout, &app.manifest())
                .map_err(AppError::SerialiseManifest)?;
            writeln!(stdout).map_err(AppError::WriteOutput)?;
        }
    }
    info!(functions = app.functions().len(), "function app described");
    Ok(ExitCode::SUCCESS)
}

/// Extracts an archive and reports what was written.
pub(crate) fn unpack<W: Write>(args: &UnpackArgs, stdout: &mut W) -> Result<ExitCode, AppError> {
    let summary = extract_archive(&args.archive, &args.target)?;
    writeln!(
        stdout,
        "extracted {} file(s) and {} directory(ies) into {}",
        summary.files(),
        summary.directories(),
        args.target.display()
    )
    .map_err(AppError::WriteOutput)?;
    Ok(ExitCode::SUCCESS)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}
