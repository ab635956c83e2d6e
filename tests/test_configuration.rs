use rask_buffer::logging::{LogFormat, LogLevel};
use rask_buffer::{Buffer, BufferConfig, BufferKind, ConfigError};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        "RASK_BUFFER_CONFIG",
        "BUFFER_KIND",
        "BUFFER_CAPACITY",
        "BUFFER_ASCENDING",
        "BUFFER_TIMEOUT_MS",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
kind = "priority"
capacity = 64
ascending = false
log_level = "warn"
"#
    )
    .unwrap();

    let config = BufferConfig::from_file(file.path()).unwrap();
    assert_eq!(config.kind, BufferKind::Priority);
    assert_eq!(config.capacity, 64);
    assert!(!config.ascending);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.log_format, LogFormat::Compact);

    let mut buffer = config.build::<i32>().unwrap();
    buffer.add_all(vec![1, 3, 2]).unwrap();
    assert_eq!(buffer.remove(), Ok(3));
}

#[test]
fn test_config_from_missing_file() {
    let result = BufferConfig::from_file("/nonexistent/rask-buffer.toml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
#[serial]
fn test_config_from_environment() {
    clean_all_env_vars();
    unsafe {
        env::set_var("BUFFER_KIND", "bounded");
        env::set_var("BUFFER_CAPACITY", "8");
        env::set_var("BUFFER_TIMEOUT_MS", "150");
        env::set_var("LOG_LEVEL", "debug");
        env::set_var("LOG_FORMAT", "json");
    }

    let config = BufferConfig::from_env().unwrap();
    assert_eq!(config.kind, BufferKind::Bounded);
    assert_eq!(config.capacity, 8);
    assert!(config.ascending);
    assert_eq!(config.timeout(), Some(Duration::from_millis(150)));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_defaults_without_environment() {
    clean_all_env_vars();
    assert_eq!(BufferConfig::from_env().unwrap(), BufferConfig::default());
}

#[test]
#[serial]
fn test_inline_config_takes_precedence() {
    clean_all_env_vars();
    unsafe {
        env::set_var("RASK_BUFFER_CONFIG", "kind = \"circular\"\ncapacity = 3");
        env::set_var("BUFFER_KIND", "bounded");
        env::set_var("BUFFER_CAPACITY", "99");
    }

    let config = BufferConfig::from_env().unwrap();
    assert_eq!(config.kind, BufferKind::Circular);
    assert_eq!(config.capacity, 3);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_invalid_environment_values() {
    clean_all_env_vars();

    unsafe {
        env::set_var("BUFFER_CAPACITY", "lots");
    }
    assert!(matches!(BufferConfig::from_env(), Err(ConfigError::EnvError(_))));

    unsafe {
        env::set_var("BUFFER_CAPACITY", "0");
    }
    assert!(matches!(BufferConfig::from_env(), Err(ConfigError::InvalidConfig(_))));

    unsafe {
        env::remove_var("BUFFER_CAPACITY");
        env::set_var("BUFFER_KIND", "stack");
    }
    let error = BufferConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("BUFFER_KIND"));

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_blocking_buffer_from_environment() {
    clean_all_env_vars();
    unsafe {
        env::set_var("BUFFER_KIND", "circular");
        env::set_var("BUFFER_CAPACITY", "2");
        env::set_var("BUFFER_TIMEOUT_MS", "10");
    }

    let config = BufferConfig::from_env().unwrap();
    let buffer = config.build_blocking::<u32>().unwrap();
    buffer.add_all(vec![1, 2, 3]).unwrap();
    assert_eq!(buffer.remove(), Ok(2));
    assert_eq!(buffer.remove(), Ok(3));
    assert!(buffer.remove().unwrap_err().is_underflow());

    clean_all_env_vars();
}
