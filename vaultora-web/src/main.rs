//! Vaultora credential service entry point.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use vaultora_core::services::CredentialService;
use vaultora_web::{create_app, logging, DatabaseCredentialRepository, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("failed to load server configuration")?;
    let _log_guard = logging::init(&config.log).context("failed to initialise logging")?;

    let repository = DatabaseCredentialRepository::connect(&config.database)
        .await
        .context("failed to open credential database")?;
    let service = web::Data::new(CredentialService::new(Arc::new(repository)));

    let addr = (config.server.host.clone(), config.server.port);
    tracing::info!(
        workers = config.server.workers,
        "Server is running on http://{}:{}",
        addr.0,
        addr.1
    );

    HttpServer::new(move || create_app(service.clone()))
        .workers(config.server.workers)
        .bind(addr)
        .context("failed to bind listener")?
        .run()
        .await
        .context("server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}
