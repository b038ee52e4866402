//! Command-line runtime for `fnpack`.
//!
//! [`run`] parses arguments, installs telemetry, and dispatches to the
//! subcommands. Output streams are injected so the runtime can be exercised
//! from tests without spawning a process.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use fnpack_archive::ArchiveError;
use fnpack_core::BundleError;
use thiserror::Error;

mod cli;
mod commands;
pub mod telemetry;

use cli::{Cli, CliCommand};
use telemetry::TelemetryError;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage(&error, stdout, stderr),
    };

    match dispatch(&cli, stdout, stderr) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            tracing::error!(%error, "command failed");
            emit(stderr, format_args!("{error}\n"));
            ExitCode::FAILURE
        }
    }
}

fn dispatch<W, E>(cli: &Cli, stdout: &mut W, stderr: &mut E) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    telemetry::initialise(&cli.config)?;
    match &cli.command {
        CliCommand::Describe(args) => commands::describe(args, &cli.config, stdout, stderr),
        CliCommand::Unpack(args) => commands::unpack(args, stdout),
    }
}

/// Help and version requests succeed on stdout; anything else is a usage
/// error on stderr.
fn report_usage<W, E>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    let rendered = error.render();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            emit(stdout, format_args!("{rendered}"));
            ExitCode::SUCCESS
        }
        _ => {
            emit(stderr, format_args!("{rendered}"));
            ExitCode::from(2)
        }
    }
}

/// Writes a final message; a closed stream leaves nothing else to report to.
fn emit<W: Write>(stream: &mut W, message: fmt::Arguments<'_>) {
    if let Err(error) = stream.write_fmt(message) {
        tracing::debug!(%error, "output stream closed");
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialise manifest: {0}")]
    SerialiseManifest(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

#[cfg(test)]
mod tests;
