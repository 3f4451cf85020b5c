// NL2SQL Server entrypoint
//!
//! The heavy lifting (bootstrap, server wiring) lives in the lifecycle
//! module so this file remains a thin orchestrator: load configuration,
//! initialize logging, run.

use anyhow::Result;
use log::info;
use nl2sql_server::config::ServerConfig;
use nl2sql_server::{lifecycle, logging};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path =
        std::env::var("NL2SQL_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = match ServerConfig::from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {}", config_path, e);
            eprintln!("Server cannot start without valid configuration");
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        config.logging.log_to_console,
        config.logging.file_path.as_deref(),
        &config.logging.format,
    )?;

    info!("NL2SQL Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let components = lifecycle::bootstrap(&config).await?;
    lifecycle::run(config, components).await
}
