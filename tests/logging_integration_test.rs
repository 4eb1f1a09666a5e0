//! Integration tests for logging functionality

use erpsync::config::LoggingConfig;
use erpsync::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig::default();
    let result = init_logging("verbose", &config);
    assert!(result.is_err());
}

// Installs the global subscriber, so it is the only test here that succeeds
#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).unwrap();
    tracing::info!("written to file");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("erpsync.log").exists());
}
