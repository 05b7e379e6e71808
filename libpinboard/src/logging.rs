//! Log output for the state core and its tools
//!
//! State transitions are logged at debug level under the `libpinboard`
//! target, failed actions at warn. Output always goes to stderr so
//! `pin-state` can print screen states on stdout.
//!
//! Settings are resolved in this order, later winning:
//!
//! 1. the `[logging]` table of the config file
//! 2. `PINBOARD_LOG_FORMAT` / `PINBOARD_LOG_LEVEL`
//! 3. `--verbose`, which turns on debug output for the Pinboard targets
//! 4. `RUST_LOG`, which replaces the filter entirely
//!
//! ```no_run
//! use libpinboard::config::LogConfig;
//! use libpinboard::logging::{LogFormat, LoggingConfig};
//!
//! let config = LogConfig {
//!     format: LogFormat::Json,
//!     level: "libpinboard::appstate=debug".to_string(),
//! };
//! LoggingConfig::from(&config).with_env_overrides().init();
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Filter used by `--verbose`
const VERBOSE_DIRECTIVE: &str = "info,libpinboard=debug,pin_state=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain lines without colors
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// Multi-line colored output
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!(
                "unknown log format '{}' (expected text, json or pretty)",
                other
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        })
    }
}

/// Resolved logging settings, ready to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `warn` or `libpinboard::appstate=debug`
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>, verbose: bool) -> Self {
        Self {
            format,
            level: level.into(),
            verbose,
        }
    }

    /// Apply `PINBOARD_LOG_FORMAT` and `PINBOARD_LOG_LEVEL`
    ///
    /// An unparseable format is ignored with a note on stderr.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("PINBOARD_LOG_FORMAT").ok(),
            std::env::var("PINBOARD_LOG_LEVEL").ok(),
        )
    }

    fn with_overrides(mut self, format: Option<String>, level: Option<String>) -> Self {
        if let Some(format) = format {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(error) => eprintln!("Ignoring PINBOARD_LOG_FORMAT: {}", error),
            }
        }
        if let Some(level) = level.filter(|level| !level.trim().is_empty()) {
            self.level = level;
        }
        self
    }

    /// The filter directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> &str {
        if self.verbose {
            VERBOSE_DIRECTIVE
        } else {
            self.level.as_str()
        }
    }

    /// Install the global subscriber
    ///
    /// A second call is a no-op.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Text => builder.with_ansi(false).with_target(false).try_init(),
            LogFormat::Json => builder
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => builder.pretty().with_target(true).try_init(),
        };

        match installed {
            Ok(()) => {
                tracing::trace!(format = %self.format, filter = self.directive(), "Logging ready")
            }
            Err(_) => tracing::trace!("Subscriber already installed"),
        }
    }
}

impl From<&LogConfig> for LoggingConfig {
    fn from(config: &LogConfig) -> Self {
        Self::new(config.format, config.level.clone(), false)
    }
}

/// Install logging from the environment alone, for embedders without a
/// config file
pub fn init_default() {
    LoggingConfig::from(&LogConfig::default())
        .with_env_overrides()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LoggingConfig {
        LoggingConfig::from(&LogConfig::default())
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml"
            .parse::<LogFormat>()
            .unwrap_err()
            .contains("unknown log format 'xml'"));
    }

    #[test]
    fn test_defaults_from_log_config() {
        let config = base();
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.directive(), "info");
    }

    #[test]
    fn test_env_values_override_config_file() {
        let config = base().with_overrides(
            Some("json".to_string()),
            Some("libpinboard::appstate=trace".to_string()),
        );
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directive(), "libpinboard::appstate=trace");
    }

    #[test]
    fn test_bad_or_blank_env_values_are_ignored() {
        let config = base().with_overrides(Some("yaml".to_string()), Some("  ".to_string()));
        assert_eq!(config, base());
    }

    #[test]
    fn test_verbose_enables_pinboard_debug() {
        let mut config = base();
        config.verbose = true;
        assert_eq!(config.directive(), VERBOSE_DIRECTIVE);
    }
}
