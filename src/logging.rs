use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log level '{input}'. Valid levels: error, warn, info, debug, trace")]
    InvalidLogLevel { input: String },

    #[error("Invalid log format '{input}'. Valid formats: compact, json")]
    InvalidLogFormat { input: String },

    #[error("Invalid directive format '{input}'. Expected: 'target=level'")]
    InvalidDirectiveFormat { input: String },

    #[error("Empty target in directive '{input}'")]
    EmptyTarget { input: String },

    #[error("Logging system initialization failed: {details}")]
    InitFailed { details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLogLevel {
                input: s.to_string(),
            }),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Output layout of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidLogFormat {
                input: s.to_string(),
            }),
        }
    }
}

/// Per-target level override, `target=level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub target: String,
    pub level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn parse(directive: &str) -> Result<Self, LoggingError> {
        let Some((target, level)) = directive.split_once('=') else {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        };
        if level.contains('=') {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        }

        let target = target.trim();
        if target.is_empty() {
            return Err(LoggingError::EmptyTarget {
                input: directive.to_string(),
            });
        }

        Ok(LogDirective::new(target, level.parse()?))
    }

    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.target, self.level.as_str())
    }
}

/// Collects filter directives and installs the global tracing subscriber.
pub struct LoggingSystem {
    directives: RwLock<Vec<LogDirective>>,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: RwLock::new(Vec::new()),
        }
    }

    pub fn add_directive(&self, directive: &str) -> Result<(), LoggingError> {
        let directive = LogDirective::parse(directive)?;
        self.directives.write().push(directive);
        Ok(())
    }

    /// Keeps the library's own wait/wake traces out of `trace`-level
    /// application output unless asked for explicitly.
    pub fn add_default_directives(&self) {
        self.directives.write().push(LogDirective::new(
            "rask_buffer::buffer::blocking",
            LogLevel::Debug,
        ));
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();
        std::iter::once(default_level.as_str().to_string())
            .chain(directives.iter().map(LogDirective::to_filter_string))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }

    pub fn clear_directives(&self) {
        self.directives.write().clear();
    }

    /// Installs the global subscriber. Fails, rather than panicking, when one
    /// is already set.
    pub fn initialize(
        &self,
        default_level: LogLevel,
        format: LogFormat,
    ) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string(default_level);
        let env_filter =
            EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
                details: format!("Failed to create EnvFilter with '{filter_string}': {e}"),
            })?;

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match format {
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .compact(),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().with_target(true).with_thread_ids(true).json())
                .try_init(),
        };

        result.map_err(|e| LoggingError::InitFailed {
            details: format!("Failed to set global tracing subscriber: {e}"),
        })
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}
