//! Courio Server: connects to SurrealDB, applies migrations and
//! sweeps expired sessions until interrupted.

mod config;

use std::error::Error;
use std::time::Duration;

use courio_auth::SessionManager;
use courio_db::DbManager;
use courio_db::repository::SurrealSessionRepository;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("courio=info".parse()?))
        .json()
        .init();

    info!("Starting Courio server...");

    let config = ServerConfig::from_env();
    config.auth.validate()?;

    let db = DbManager::connect_and_migrate(&config.db).await?;
    let sessions = SessionManager::new(
        SurrealSessionRepository::new(db.client().clone()),
        config.auth.clone(),
    );

    info!(
        interval_secs = config.purge_interval_secs,
        "Expired-session janitor running"
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(config.purge_interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sessions.purge_expired().await {
                    Ok(removed) => info!(removed, "Expired-session sweep finished"),
                    Err(e) => error!(error = %e, "Expired-session sweep failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Courio server stopped.");
    Ok(())
}
