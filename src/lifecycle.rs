//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting kept out of `main.rs`:
//! bootstrapping the database pool and collaborators, wiring the HTTP
//! server, and running it to completion.

use crate::config::ServerConfig;
use crate::memory::SessionMemoryStore;
use crate::pipeline::Nl2SqlPipeline;
use crate::providers::{
    HttpTranslator, PgQueryExecutor, PgSchemaProvider, QueryExecutor, SchemaProvider, Translator,
};
use crate::routes;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Aggregated application components shared across HTTP workers.
pub struct ApplicationComponents {
    pub pipeline: Arc<Nl2SqlPipeline>,
    pub schema_provider: Arc<dyn SchemaProvider>,
}

/// Initialize the database pool, the AI client, the session store, and the
/// pipeline that ties them together.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let phase_start = std::time::Instant::now();
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    info!(
        "Database pool ready (max_connections={}, {:.2}ms)",
        config.database.max_connections,
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let schema_provider: Arc<dyn SchemaProvider> = Arc::new(PgSchemaProvider::new(pool.clone()));
    let executor: Arc<dyn QueryExecutor> = Arc::new(PgQueryExecutor::new(pool));
    let translator: Arc<dyn Translator> = Arc::new(HttpTranslator::new(
        &config.ai.base_url,
        Duration::from_secs(config.ai.timeout_seconds),
    )?);
    info!("AI service client configured: {}", config.ai.base_url);

    let memory = Arc::new(SessionMemoryStore::new());
    let pipeline = Arc::new(Nl2SqlPipeline::new(
        Arc::clone(&schema_provider),
        translator,
        executor,
        memory,
        config.guard.max_rows,
    ));

    Ok(ApplicationComponents {
        pipeline,
        schema_provider,
    })
}

/// Wire the actix-web server and run it until shutdown.
pub async fn run(config: ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        "Starting HTTP server on {} (workers={}, max_rows={})",
        bind_addr,
        if config.server.workers == 0 {
            "auto".to_string()
        } else {
            config.server.workers.to_string()
        },
        config.guard.max_rows
    );

    let pipeline = components.pipeline;
    let schema_provider = components.schema_provider;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&pipeline)))
            .app_data(web::Data::new(Arc::clone(&schema_provider)))
            .configure(routes::configure_routes)
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_addr)?.run().await?;

    info!("Server stopped");
    Ok(())
}
