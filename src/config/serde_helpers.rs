use super::ConfigError;

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .trim()
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Like [`load_env_var`] for optional settings; an empty value clears the target.
pub fn load_env_var_opt<T>(name: &str, target: &mut Option<T>) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        let value = value.trim();
        *target = if value.is_empty() {
            None
        } else {
            Some(
                value
                    .parse()
                    .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?,
            )
        };
    }
    Ok(())
}
