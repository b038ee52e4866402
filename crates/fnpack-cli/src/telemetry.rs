//! Structured telemetry initialisation for the binary.
//!
//! `fnpack` writes its artefacts and reports to stdout, so every log event
//! goes to stderr. Compact output is meant for a developer's terminal and
//! carries no timestamp. JSON output is meant for build pipelines and
//! carries an RFC 3339 UTC timestamp.

use std::io::{self, IsTerminal};

use fnpack_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter, time::UtcTime};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global tracing subscriber on first use.
///
/// Later calls return immediately, whatever configuration they carry.
///
/// # Examples
///
/// ```rust,no_run
/// use fnpack_cli::telemetry;
/// use fnpack_config::{Config, LogFormat};
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// let config = Config::default().with_log_format(LogFormat::Json);
/// telemetry::initialise(&config)?;
/// telemetry::initialise(&Config::default())?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or another
/// subscriber was installed first.
pub fn initialise(config: &Config) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| {
            let subscriber = build_subscriber(config, io::stderr, io::stderr().is_terminal())?;
            tracing::subscriber::set_global_default(subscriber)
                .map_err(TelemetryError::Subscriber)
        })
        .map(|_| ())
}

/// Builds the subscriber for `config` without installing it.
pub(crate) fn build_subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<BoxedSubscriber, TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(writer)
        .with_ansi(ansi);

    let subscriber: BoxedSubscriber = match config.log_format() {
        LogFormat::Json => Box::new(
            builder
                .with_timer(UtcTime::rfc_3339())
                .json()
                .flatten_event(true)
                .finish(),
        ),
        LogFormat::Compact => Box::new(builder.without_time().compact().finish()),
    };
    Ok(subscriber)
}
