//! Maintenance service: exposes the redundant question cleanup over HTTP

use anyhow::Context;
use patient_intake::config::{ensure_database_dir, IntakeConfig};
use patient_intake::maintenance::{build_router, SqliteQuestionStore, REMOVE_REDUNDANT_QUESTIONS_ROUTE};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patient_intake=info,intake_maintenance=info".into()),
        )
        .init();

    let config = IntakeConfig::load()?.with_env_overrides();
    let database_url = config.database_url();
    ensure_database_dir(database_url)?;

    let store = SqliteQuestionStore::connect(database_url)
        .await
        .map_err(|error| {
            error!(%database_url, %error, "failed to open question database");
            error
        })?;

    let app = build_router(Arc::new(store));

    let addr: SocketAddr = config
        .maintenance_bind()
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.maintenance_bind()))?;
    info!(%addr, route = REMOVE_REDUNDANT_QUESTIONS_ROUTE, "maintenance service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
