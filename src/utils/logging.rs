use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::settings::{LogFormat, LoggingConfig};


/// `--log-level` / `LOG_LEVEL` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}


/// Merge the file logging section with a command line level override.
pub fn resolve(file_config: Option<&LoggingConfig>, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let base = file_config.cloned().unwrap_or_default();
    match arg_log_level {
        Some(level) => LoggingConfig::new(level.as_directive().to_owned(), base.format),
        None => base,
    }
}

pub fn run(file_config: Option<&LoggingConfig>, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(file_config, arg_log_level));
}


/// Initialize tracing with the desired config.
///
/// Logs go to stderr, stdout carries command output. Json output skips ANSI
/// colors and flattens fields for CRI log parsers.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let base = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);
    let format_layer = match cfg.format {
        LogFormat::Json => base.json().flatten_event(true).with_ansi(false).boxed(),
        LogFormat::Compact => base.compact().with_ansi(true).boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer)
        .try_init();
}
