//! DB Bridge - Main entry point.
//!
//! Validates a MySQL-family connection or lists the tables of a database
//! with their row counts.

use db_bridge::config::{Command, Config};
use db_bridge::db::{ConnectionValidator, MySqlConnector, SchemaInspector};
use db_bridge::format::{format_outcome, format_tables};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr so stdout only carries command output.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    // Initialize logging
    init_tracing(&config);

    let descriptor = config.command.connection().descriptor()?;
    debug!(?descriptor, "Resolved connection descriptor");

    info!(
        driver = %descriptor.driver,
        "Starting DB Bridge v{}",
        env!("CARGO_PKG_VERSION")
    );

    match &config.command {
        Command::Check(_) => {
            let validator = ConnectionValidator::new(MySqlConnector::new())
                .with_connect_timeout(config.connect_timeout_duration());
            let outcome = validator.validate(&descriptor).await;
            println!("{}", format_outcome(&outcome, config.format).trim_end());

            if outcome.is_failed() {
                std::process::exit(1);
            }
        }
        Command::Tables(_) => {
            let validator = ConnectionValidator::new(MySqlConnector::new())
                .with_connect_timeout(config.connect_timeout_duration());
            let inspector = SchemaInspector::new(MySqlConnector::new())
                .with_connect_timeout(config.connect_timeout_duration());

            match inspector.list_validated_tables(&validator, &descriptor).await {
                Ok(tables) => {
                    println!("{}", format_tables(&tables, config.format).trim_end());
                }
                Err(outcome) => {
                    // No tables without a validated database connection
                    println!("{}", format_outcome(&outcome, config.format).trim_end());
                    if outcome.is_failed() {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}
