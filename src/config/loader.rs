//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ErpSyncConfig, StoreBackend};
use crate::config::secret_string;
use crate::domain::errors::ErpSyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ErpSyncConfig
/// 4. Applies environment variable overrides (ERPSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use erpsync::config::loader::load_config;
///
/// let config = load_config("erpsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ErpSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ErpSyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ErpSyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration from TOML text
///
/// # Errors
///
/// Returns a configuration error for missing `${VAR}` references, invalid TOML,
/// or values rejected by [`ErpSyncConfig::validate`]. A zero batch size is
/// reported as [`ErpSyncError::InvalidBatchSize`].
pub fn parse_config(contents: &str) -> Result<ErpSyncConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ErpSyncConfig = toml::from_str(&contents)
        .map_err(|e| ErpSyncError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    if config.sync.batch_size == 0 {
        return Err(ErpSyncError::InvalidBatchSize(config.sync.batch_size));
    }

    config.validate().map_err(|e| {
        ErpSyncError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ErpSyncError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ErpSyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ErpSyncError::Configuration(format!("Invalid value '{value}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using ERPSYNC_* prefix
///
/// Environment variables follow the pattern: ERPSYNC_<SECTION>_<KEY>
/// For example: ERPSYNC_SYNC_BATCH_SIZE, ERPSYNC_SERVER_PORT
fn apply_env_overrides(config: &mut ErpSyncConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ERPSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ERPSYNC_STORE_BACKEND") {
        config.store_backend = match val.to_lowercase().as_str() {
            "postgresql" => StoreBackend::PostgreSQL,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ErpSyncError::Configuration(format!(
                    "Invalid ERPSYNC_STORE_BACKEND '{other}'. Must be one of: postgresql, memory"
                )))
            }
        };
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("ERPSYNC_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("ERPSYNC_POSTGRESQL_MAX_CONNECTIONS") {
            pg_config.max_connections =
                parse_override("ERPSYNC_POSTGRESQL_MAX_CONNECTIONS", &val)?;
        }
        if let Ok(val) = std::env::var("ERPSYNC_POSTGRESQL_SEED_ON_EMPTY") {
            pg_config.seed_on_empty = parse_override("ERPSYNC_POSTGRESQL_SEED_ON_EMPTY", &val)?;
        }
    }

    // Sync overrides
    if let Ok(val) = std::env::var("ERPSYNC_SYNC_BATCH_SIZE") {
        config.sync.batch_size = parse_override("ERPSYNC_SYNC_BATCH_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("ERPSYNC_SYNC_MAX_RETRIES") {
        config.sync.max_retries = parse_override("ERPSYNC_SYNC_MAX_RETRIES", &val)?;
    }
    if let Ok(val) = std::env::var("ERPSYNC_SYNC_RETRY_DELAY_MS") {
        config.sync.retry_delay_ms = parse_override("ERPSYNC_SYNC_RETRY_DELAY_MS", &val)?;
    }
    if let Ok(val) = std::env::var("ERPSYNC_SYNC_INTERVAL_SECONDS") {
        config.sync.interval_seconds = parse_override("ERPSYNC_SYNC_INTERVAL_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("ERPSYNC_SYNC_SCHEDULE_ENABLED") {
        config.sync.schedule_enabled = parse_override("ERPSYNC_SYNC_SCHEDULE_ENABLED", &val)?;
    }

    // CRM overrides
    if let Ok(val) = std::env::var("ERPSYNC_CRM_FAILURE_RATE") {
        config.crm.failure_rate = parse_override("ERPSYNC_CRM_FAILURE_RATE", &val)?;
    }

    // Server overrides
    if let Ok(val) = std::env::var("ERPSYNC_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("ERPSYNC_SERVER_PORT") {
        config.server.port = parse_override("ERPSYNC_SERVER_PORT", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ERPSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("ERPSYNC_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("ERPSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
