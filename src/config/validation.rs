use super::{BufferConfig, ConfigError};

impl BufferConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "Buffer capacity must be greater than 0".to_string(),
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Timeout must be greater than 0 when set; omit it to wait indefinitely".to_string(),
            ));
        }

        Ok(())
    }
}
