//! Validate config command implementation

use crate::cli::commands::exit_code_for;
use crate::config::load_config;
use crate::config::schema::StoreBackend;
use crate::config::secret::redact_connection_string;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is valid.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(exit_code_for(&e));
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);

        match config.store_backend {
            StoreBackend::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!("  Store Backend: PostgreSQL");
                    println!(
                        "  PostgreSQL Connection: {}",
                        redact_connection_string(pg_config.connection_string.expose_secret().as_str())
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                    println!("  Seed On Empty: {}", pg_config.seed_on_empty);
                }
            }
            StoreBackend::Memory => println!("  Store Backend: memory"),
        }

        println!("  Batch Size: {}", config.sync.batch_size);
        println!("  Max Retries: {}", config.sync.max_retries);
        println!("  Retry Delay: {} ms", config.sync.retry_delay_ms);
        if config.sync.schedule_enabled {
            println!("  Schedule: every {} s", config.sync.interval_seconds);
        } else {
            println!("  Schedule: disabled");
        }
        println!("  CRM Failure Rate: {}", config.crm.failure_rate);
        println!("  HTTP Listener: {}", config.server.bind_address());
        println!();
        Ok(0)
    }
}
