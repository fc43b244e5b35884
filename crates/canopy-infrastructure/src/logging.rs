//! Structured logging for hosts embedding the injector
//!
//! One global subscriber per process: an `EnvFilter` seeded from the
//! configured level (`CANOPY_LOG` takes precedence), a console layer and,
//! when `file_output` is set, a daily-rolling file layer. Both layers use the
//! plain or JSON format chosen in [`LoggingConfig`].

use std::ffi::OsStr;
use std::path::Path;

use canopy_domain::error::{Error, Result};
use tracing::{Level, Subscriber, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_PREFIX, LOG_ENV_VAR};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global subscriber described by `config`
///
/// Fails with [`Error::Configuration`] on an unknown level and with
/// [`Error::Config`] when a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file = config
        .file_output
        .as_deref()
        .map(|path| file_layer(path, config.json_format));

    Registry::default()
        .with(filter)
        .with(console_layer(config.json_format))
        .with(file)
        .try_init()
        .map_err(|err| Error::config(format!("log subscriber already installed: {err}")))?;

    info!(%level, json = config.json_format, "logging ready");
    Ok(())
}

fn console_layer<S>(json: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

fn file_layer<S>(path: &Path, json: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_PREFIX));
    let layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(directory, prefix))
        .with_ansi(false)
        .with_target(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

/// Map a configured level name onto a tracing level
///
/// Case-insensitive; `warning` is accepted for `warn`.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::Configuration {
            message: format!("unknown log level `{level}`, expected trace|debug|info|warn|error"),
            source: None,
        }),
    }
}

/// Record whether the configuration file a load asked for was merged
pub fn log_config_source(path: &Path, found: bool) {
    if found {
        info!(path = %path.display(), "configuration file merged");
    } else {
        warn!(path = %path.display(), "configuration file missing, using defaults and environment");
    }
}
