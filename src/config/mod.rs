pub mod serde_helpers;
mod validation;

use crate::buffer::{
    BlockingBuffer, Buffer, BufferError, DEFAULT_CAPACITY, FifoBuffer, PriorityBuffer,
};
use crate::logging::{LogFormat, LogLevel, LoggingError, LoggingSystem};
use serde::{Deserialize, Serialize};
use serde_helpers::{load_env_var, load_env_var_opt};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Type-erased buffer produced by [`BufferConfig::build`].
pub type DynBuffer<T> = Box<dyn Buffer<T> + Send>;

/// Environment variable holding a complete inline TOML configuration.
pub const CONFIG_ENV_VAR: &str = "RASK_BUFFER_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
    #[error("Buffer construction failed: {0}")]
    Buffer(#[from] BufferError),
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Which buffer [`BufferConfig::build`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    #[default]
    Unbounded,
    Bounded,
    Circular,
    Priority,
}

impl FromStr for BufferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unbounded" => Ok(BufferKind::Unbounded),
            "bounded" => Ok(BufferKind::Bounded),
            "circular" => Ok(BufferKind::Circular),
            "priority" => Ok(BufferKind::Priority),
            other => Err(format!(
                "unknown buffer kind '{other}' (expected unbounded, bounded, circular or priority)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    pub kind: BufferKind,
    /// Fixed capacity for bounded/circular, initial capacity otherwise.
    pub capacity: usize,
    /// Priority order; ignored by the FIFO kinds.
    pub ascending: bool,
    /// Default wait bound for blocking `get`/`remove`. `None` waits forever.
    pub timeout_ms: Option<u64>,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            kind: BufferKind::Unbounded,
            capacity: DEFAULT_CAPACITY,
            ascending: true,
            timeout_ms: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
        }
    }
}

impl BufferConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reads [`CONFIG_ENV_VAR`] as inline TOML when set, otherwise the
    /// individual `BUFFER_*` and `LOG_*` variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(inline) = std::env::var(CONFIG_ENV_VAR) {
            tracing::debug!(source = CONFIG_ENV_VAR, "Loading buffer configuration");
            return Self::from_toml_str(&inline);
        }

        let mut config = Self::default();
        load_env_var("BUFFER_KIND", &mut config.kind)?;
        load_env_var("BUFFER_CAPACITY", &mut config.capacity)?;
        load_env_var("BUFFER_ASCENDING", &mut config.ascending)?;
        load_env_var_opt("BUFFER_TIMEOUT_MS", &mut config.timeout_ms)?;
        load_env_var("LOG_LEVEL", &mut config.log_level)?;
        load_env_var("LOG_FORMAT", &mut config.log_format)?;

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Builds the configured buffer behind the [`Buffer`] trait.
    pub fn build<T>(&self) -> Result<DynBuffer<T>, ConfigError>
    where
        T: Ord + Send + 'static,
    {
        let buffer: DynBuffer<T> = match self.kind {
            BufferKind::Unbounded => Box::new(FifoBuffer::unbounded_with_capacity(self.capacity)?),
            BufferKind::Bounded => Box::new(FifoBuffer::bounded(self.capacity)?),
            BufferKind::Circular => Box::new(FifoBuffer::circular(self.capacity)?),
            BufferKind::Priority => Box::new(PriorityBuffer::with_capacity(
                self.capacity,
                self.ascending,
            )?),
        };
        tracing::debug!(kind = ?self.kind, capacity = self.capacity, "Built buffer");
        Ok(buffer)
    }

    /// Builds the configured buffer wrapped for cross-thread blocking use,
    /// with [`Self::timeout`] as the default wait bound.
    pub fn build_blocking<T>(&self) -> Result<BlockingBuffer<T, DynBuffer<T>>, ConfigError>
    where
        T: Ord + Send + 'static,
    {
        let buffer = self.build()?;
        Ok(match self.timeout() {
            Some(timeout) => BlockingBuffer::with_timeout(buffer, timeout),
            None => BlockingBuffer::new(buffer),
        })
    }

    /// Installs the global tracing subscriber at the configured level and format.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let logging = LoggingSystem::new();
        logging.add_default_directives();
        logging.initialize(self.log_level, self.log_format)?;
        Ok(())
    }
}
