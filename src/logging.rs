//! Diagnostics setup
//!
//! The library only emits `tracing` events. The binary installs a subscriber once,
//! writing to stderr so that the rendered tree on stdout is never interleaved with
//! log lines.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::JduError;

/// Environment variable holding `EnvFilter` directives, e.g. `JDU_LOG=debug`.
pub const LOG_ENV: &str = "JDU_LOG";

/// Environment variable selecting the log format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "JDU_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, JduError> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(JduError::Logging(format!(
                "invalid log format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter when `JDU_LOG` is unset: trace, debug, info, warn, error, off
    pub level: String,
    pub format: LogFormat,
    /// ANSI colours in text log lines
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            color: false,
        }
    }
}

/// Install the global subscriber.
///
/// Priority: `JDU_LOG` / `JDU_LOG_FORMAT` environment variables, then `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), JduError> {
    let filter = build_env_filter(config)?;
    let format = match std::env::var(LOG_FORMAT_ENV) {
        Ok(value) if !value.is_empty() => LogFormat::parse(&value)?,
        _ => config.format,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| JduError::Logging(e.to_string()))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, JduError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| JduError::Logging(format!("invalid log level '{}': {}", config.level, e)))
}
