//! Default values for configuration fields.

use crate::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
