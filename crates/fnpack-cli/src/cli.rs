//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fnpack_config::Config;

/// Derives serverless function descriptors from annotated services.
#[derive(Parser, Debug)]
#[command(name = "fnpack", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: Config,
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Analyses an exported syntax tree and emits the function app
    /// descriptors.
    Describe(DescribeArgs),
    /// Extracts a zip archive, rejecting entries that escape the target.
    Unpack(UnpackArgs),
}

#[derive(Args, Debug)]
pub(crate) struct DescribeArgs {
    /// Syntax tree of one module, as JSON.
    #[arg(value_name = "TREE")]
    pub(crate) tree: PathBuf,
    /// JSON array of listener symbols resolved by the compiler.
    #[arg(long, value_name = "FILE")]
    pub(crate) symbols: Option<PathBuf>,
    /// Writes `host.json` and one `function.json` per function beneath DIR
    /// instead of printing the manifest.
    #[arg(long, value_name = "DIR")]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct UnpackArgs {
    /// Archive to extract.
    #[arg(value_name = "ARCHIVE")]
    pub(crate) archive: PathBuf,
    /// Directory the entries are written beneath.
    #[arg(value_name = "DIR")]
    pub(crate) target: PathBuf,
}
