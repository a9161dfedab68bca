//! Structured logging setup for dockflow
//!
//! Logging is built on the `tracing` ecosystem. Console output goes to stderr,
//! and when a log file is configured every event is also appended to that file
//! in plain text so the job platform can collect the run log.
//!
//! # Example
//!
//! ```no_run
//! use dockflow::util::logging::{self, LoggingConfig};
//!
//! logging::init_logging(LoggingConfig::from_env()).expect("logging");
//!
//! use tracing::{info, warn};
//!
//! info!("Pipeline started");
//! warn!(path = "/tmp/run1", "Workspace already exists");
//! ```

use anyhow::{Context, Result};
use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format on the console
    pub use_json: bool,

    /// Include the module target (e.g., dockflow::pipeline) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,

    /// Additional plain-text log file, opened in append mode
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    /// Defaults: INFO, pretty console output, targets on, no location, no file
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level
    ///
    /// ```
    /// use dockflow::util::LoggingConfig;
    /// use tracing::Level;
    ///
    /// let config = LoggingConfig::with_level(Level::DEBUG);
    /// assert_eq!(config.level, Level::DEBUG);
    /// ```
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON console output with full metadata
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
            log_file: None,
        }
    }

    /// Debug level with pretty console output
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }

    /// Reads `DOCKFLOW_LOG_LEVEL` and `DOCKFLOW_LOG_JSON`
    pub fn from_env() -> Self {
        let level_str = env::var("DOCKFLOW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let use_json = env::var("DOCKFLOW_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level: parse_level(&level_str),
            use_json,
            ..Default::default()
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

/// Parses a log level from a string, falling back to INFO
///
/// ```
/// use dockflow::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<Option<File>> {
    config
        .log_file
        .as_ref()
        .map(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))
        })
        .transpose()
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("dockflow={}", level).parse() {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Initializes the logging system with the provided configuration
///
/// Only the first call installs a subscriber; later calls are ignored. When
/// the configured log file cannot be opened the stderr layer is installed
/// anyway and the open error is returned.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let (log_file, open_error) = match open_log_file(&config) {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    INIT.call_once(|| {
        let file_layer = log_file.map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(config.include_target)
                .with_writer(Mutex::new(file))
        });

        if config.use_json {
            tracing_subscriber::registry()
                .with(build_filter(config.level))
                .with(file_layer)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(build_filter(config.level))
                .with(file_layer)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });

    match open_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
