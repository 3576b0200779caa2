//! Task rate API entry point.
//!
//! Start-up order: tracing, settings, migrations, pool, accrual loop, HTTP
//! server. When the server stops the accrual loop is cancelled and awaited.

mod server;

use std::sync::Arc;

use actix_web::web;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};
use taskapi::domain::EarningsAccrual;
use taskapi::inbound::http::health::HealthState;
use taskapi::outbound::persistence::{DbPool, DieselStoreProbe, PoolConfig, migrate};
use taskapi::settings::ServerSettings;

/// Optional dotenv file with `API_*` and `DB_*` variables.
const ENV_FILE: &str = "config/config.env";

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    match dotenvy::from_filename(ENV_FILE) {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to read environment file"),
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().map_err(std::io::Error::other)?;

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        let applied = migrate(database_url.clone())
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(
        HealthState::new().with_store_probe(Arc::new(DieselStoreProbe::new(pool.clone()))),
    );
    let config = ServerConfig::from_pool(settings.bind_addr(), &pool);

    let cancel = CancellationToken::new();
    let accrual = EarningsAccrual::new(config.tasks(), settings.accrual_config()).spawn(cancel.clone());

    info!(addr = %settings.bind_addr(), "starting HTTP server");
    let served = match create_server(health_state.clone(), config) {
        Ok(server) => server.await,
        Err(err) => Err(err),
    };

    health_state.mark_unhealthy();
    cancel.cancel();
    if let Err(err) = accrual.await {
        warn!(error = %err, "earnings accrual task ended abnormally");
    }
    served
}
