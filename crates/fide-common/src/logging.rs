//! Logging configuration and initialization
//!
//! Every binary in the workspace logs through `tracing`. This module builds the
//! global subscriber from a [`LogConfig`]:
//!
//! - console output, daily rotating file output, or both
//! - human-readable text or JSON lines
//! - a base level plus extra `EnvFilter` directives (e.g. `sqlx=warn`)
//!
//! Use structured fields rather than formatted strings where a value is worth
//! searching for:
//!
//! ```rust
//! use tracing::warn;
//!
//! let fide_id = 4100018_u64;
//! warn!(fide_id, "Skipping player");
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fide_common::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env().unwrap_or_default();
//! let _guard = init_logging(&config).unwrap();
//! tracing::info!("Application started");
//! ```

use crate::error::{FideError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Minimum level of events to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = FideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(FideError::Config(format!("Invalid log level: {}", s))),
        }
    }
}

/// Where log events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    fn includes_console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn includes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl std::str::FromStr for LogOutput {
    type Err = FideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(FideError::Config(format!("Invalid log output: {}", s))),
        }
    }
}

/// Line format of log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = FideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(FideError::Config(format!("Invalid log format: {}", s))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub output: LogOutput,
    pub format: LogFormat,

    /// Directory for rolling log files (only used when output includes file)
    pub log_dir: PathBuf,

    /// Log file name prefix, e.g. "fide-ingest" -> "fide-ingest.2024-01-18"
    pub log_file_prefix: String,

    /// Extra comma separated filter directives (e.g. "sqlx=warn,tower_http=debug")
    pub filter_directives: Option<String>,

    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "fide".to_string(),
            filter_directives: None,
            include_targets: true,
        }
    }
}

impl LogConfig {
    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder::default()
    }

    /// Load configuration from environment variables on top of the defaults
    ///
    /// Recognised variables: `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`,
    /// `LOG_FILE_PREFIX`, `LOG_FILTER`, `LOG_INCLUDE_TARGETS`.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields of an existing configuration with any logging
    /// variables present in the environment
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.level = level.parse()?;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            self.output = output.parse()?;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.format = format.parse()?;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("LOG_FILE_PREFIX") {
            self.log_file_prefix = prefix;
        }
        if let Ok(filter) = std::env::var("LOG_FILTER") {
            self.filter_directives = Some(filter);
        }
        if let Ok(val) = std::env::var("LOG_INCLUDE_TARGETS") {
            self.include_targets = val.parse().unwrap_or(true);
        }
        Ok(self)
    }
}

/// Builder for [`LogConfig`]
#[derive(Default)]
pub struct LogConfigBuilder {
    config: LogConfig,
}

impl LogConfigBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    pub fn log_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_file_prefix = prefix.into();
        self
    }

    pub fn filter_directives(mut self, filter: impl Into<String>) -> Self {
        self.config.filter_directives = Some(filter.into());
        self
    }

    pub fn build(self) -> LogConfig {
        self.config
    }
}

/// Install the global tracing subscriber
///
/// Call once at startup. When file output is enabled the returned guard
/// flushes the background writer on drop, so the caller must keep it alive
/// for the lifetime of the process.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if config.output.includes_console() {
        layers.push(console_layer(config));
    }

    if config.output.includes_file() {
        std::fs::create_dir_all(&config.log_dir)?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);
        layers.push(file_layer(config, writer));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| FideError::Logging(e.to_string()))?;

    Ok(guard)
}

fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    let mut filter =
        EnvFilter::from_default_env().add_directive(config.level.to_tracing_level().into());

    if let Some(ref directives) = config.filter_directives {
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let parsed = directive.parse().map_err(|e| {
                FideError::Config(format!("Invalid filter directive '{}': {}", directive, e))
            })?;
            filter = filter.add_directive(parsed);
        }
    }

    Ok(filter)
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(config.include_targets)
        .with_span_events(FmtSpan::CLOSE);

    match config.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(config: &LogConfig, writer: NonBlocking) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_targets)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false);

    match config.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
