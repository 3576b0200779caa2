//! Database provisioning for the Diesel adapter suite.
//!
//! Databases are created with the raw `postgres` client so no Diesel
//! transaction wraps `CREATE DATABASE`. The schema comes from the crate's
//! embedded migrations, so tests never drift from production.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use taskapi::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

use super::format_postgres_error;

/// Maintenance database every cluster ships with.
const ADMIN_DATABASE: &str = "postgres";

/// Create a uniquely named database, migrate it, and return its URL.
pub fn provision_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("taskapi_test_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&connection.database_url(ADMIN_DATABASE), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}

/// Drop the `tasks` table to simulate a broken store.
pub fn drop_tasks_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("DROP TABLE IF EXISTS tasks;")
        .map_err(|err| format_postgres_error(&err))
}
