//! Shared configuration for the fnpack tooling.
//!
//! [`Config`] is a set of `clap` arguments, each of which can also be
//! supplied through an `FNPACK_*` environment variable. Command-line values
//! take precedence over the environment, which takes precedence over the
//! defaults in [`defaults`].

use clap::Args;
use fnpack_core::AnalysisConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod defaults;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter, default_log_format};

/// How `fnpack` renders its diagnostics log on stderr.
///
/// Parsed case-insensitively from `--log-format` or `FNPACK_LOG_FORMAT`.
///
/// ```
/// use fnpack_config::LogFormat;
///
/// assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
/// assert_eq!(LogFormat::default().to_string(), "compact");
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, for build pipelines that collect logs.
    Json,
    /// Single-line events for interactive builds.
    #[default]
    Compact,
}

/// Runtime configuration shared by every fnpack command.
#[derive(Debug, Clone, PartialEq, Eq, Args, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive, for example `info` or `fnpack_core=debug`.
    #[arg(
        long,
        env = "FNPACK_LOG_FILTER",
        default_value = DEFAULT_LOG_FILTER,
        global = true
    )]
    #[serde(default = "default_log_filter_string")]
    log_filter: String,

    /// Log output format (`compact` or `json`).
    #[arg(
        long,
        env = "FNPACK_LOG_FORMAT",
        default_value_t = default_log_format(),
        global = true
    )]
    #[serde(default = "default_log_format")]
    log_format: LogFormat,

    /// Reject resource paths containing segments that cannot be resolved
    /// statically instead of skipping them.
    #[arg(long, env = "FNPACK_STRICT_PATHS", global = true)]
    #[serde(default)]
    strict_paths: bool,

    /// Suppress the informational note emitted for each generated function.
    #[arg(long, env = "FNPACK_QUIET_GENERATION", global = true)]
    #[serde(default)]
    quiet_generation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            strict_paths: false,
            quiet_generation: false,
        }
    }
}

impl Config {
    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns whether strict path resolution is enabled.
    #[must_use]
    pub const fn strict_paths(&self) -> bool {
        self.strict_paths
    }

    /// Overrides the tracing filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Overrides the log output format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Derives the analysis options passed to the extraction pipeline.
    #[must_use]
    pub const fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig::new()
            .with_strict_paths(self.strict_paths)
            .with_report_generated(!self.quiet_generation)
    }
}

fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

#[cfg(test)]
mod tests;
