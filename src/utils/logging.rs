//! Structured logging setup
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. `RUST_LOG` always wins over the configured level.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::models::config::Settings;

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Include the module target (e.g. depbuild::builders::nodejs)
    pub include_target: bool,

    /// Include thread names, useful when manifests are read in parallel
    pub include_thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_target: false,
            include_thread_names: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level derived from the quiet/verbose switches
    ///
    /// Verbose wins when both are set.
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.verbose {
            Self {
                level: Level::DEBUG,
                include_target: true,
                include_thread_names: true,
            }
        } else if settings.quiet {
            Self::with_level(Level::ERROR)
        } else {
            Self::default()
        }
    }

    /// Filter directive applied when `RUST_LOG` is unset
    pub fn directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME"), self.level.as_str().to_lowercase())
    }
}

/// Parses a log level, falling back to WARN for unknown names
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the global subscriber; later calls are ignored
///
/// Events go to stderr so report output on stdout stays machine-readable.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = match env::var("RUST_LOG") {
            Ok(spec) if !spec.trim().is_empty() => EnvFilter::new(spec),
            _ => EnvFilter::new(config.directive()),
        };

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_thread_names(config.include_thread_names);

        // A subscriber installed by an embedding program takes precedence
        let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Info"), Level::INFO);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("loud"), Level::WARN);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        assert_eq!(LoggingConfig::from_settings(&settings).level, Level::WARN);

        settings.quiet = true;
        assert_eq!(LoggingConfig::from_settings(&settings).level, Level::ERROR);

        settings.verbose = true;
        let config = LoggingConfig::from_settings(&settings);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_target);
    }

    #[test]
    fn test_directive_targets_this_crate() {
        let config = LoggingConfig::with_level(Level::DEBUG);
        assert_eq!(config.directive(), "depbuild=debug");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::with_level(Level::TRACE));
    }
}
