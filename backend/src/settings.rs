//! Server settings loaded via OrthoConfig.
//!
//! Values come from `API_*` environment variables or matching CLI flags.
//! When `API_DATABASE_URL` is absent the connection URL is assembled from the
//! `DB_HOST`, `DB_NAME`, `DB_USER` and `DB_PASSWORD` variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{AccrualConfig, RateDivision};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACCRUAL_INTERVAL_SECS: u64 = 60;
const DEFAULT_DB_HOST: &str = "localhost";

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("no database configured: set API_DATABASE_URL or DB_NAME")]
    MissingDatabase,
    #[error("invalid database url: {message}")]
    InvalidDatabaseUrl { message: String },
}

/// Runtime settings for the API server and the accrual loop.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API")]
pub struct ServerSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Full PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds between accrual ticks.
    pub accrual_interval_secs: Option<u64>,
    /// Divide hourly rates exactly instead of truncating to whole units.
    #[ortho_config(default = false)]
    pub accrual_exact_rate: bool,
    /// Do not apply embedded migrations at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

/// Source of the `DB_*` fallback variables, swappable in tests.
pub trait DbEnv {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
pub struct ProcessEnv;

impl DbEnv for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn accrual_config(&self) -> AccrualConfig {
        let division = if self.accrual_exact_rate {
            RateDivision::Exact
        } else {
            RateDivision::Truncating
        };
        let secs = self
            .accrual_interval_secs
            .unwrap_or(DEFAULT_ACCRUAL_INTERVAL_SECS);
        AccrualConfig::new(Duration::from_secs(secs), division)
    }

    /// Resolve the connection URL from the process environment.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        self.database_url_from(&ProcessEnv)
    }

    /// Resolve the connection URL, preferring `database_url` and otherwise
    /// composing one from `DB_*` variables read through `env`.
    pub fn database_url_from(&self, env: &impl DbEnv) -> Result<String, SettingsError> {
        if let Some(url) = self.database_url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.to_owned());
        }
        let name = env.var("DB_NAME").ok_or(SettingsError::MissingDatabase)?;
        let host = env.var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_owned());
        compose_database_url(
            &host,
            &name,
            env.var("DB_USER").as_deref(),
            env.var("DB_PASSWORD").as_deref(),
        )
    }
}

fn invalid_url(message: impl Into<String>) -> SettingsError {
    SettingsError::InvalidDatabaseUrl {
        message: message.into(),
    }
}

/// Build a `postgres://` URL, percent-encoding credentials.
fn compose_database_url(
    host: &str,
    name: &str,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<String, SettingsError> {
    let mut url = Url::parse(&format!("postgres://{host}"))
        .map_err(|err| invalid_url(format!("host {host:?}: {err}")))?;
    url.set_path(name);
    if let Some(user) = user {
        url.set_username(user)
            .map_err(|()| invalid_url("cannot set user"))?;
    }
    if let Some(password) = password {
        url.set_password(Some(password))
            .map_err(|()| invalid_url("cannot set password"))?;
    }
    Ok(url.into())
}
