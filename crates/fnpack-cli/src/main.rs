//! Binary entry point for `fnpack`.
//!
//! All work is delegated to [`fnpack_cli::run`] so the runtime can be driven
//! from tests with in-memory streams.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    fnpack_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
