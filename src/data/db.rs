use std::time::Duration;

use anyhow::{Context, Result};
use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

use crate::config::SchedulerConfig;
use crate::data::migrations;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection pragmas applied whenever the pool opens a connection
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool and brings the schema up to date.
///
/// The caller owns the returned handle; dropping it closes every
/// connection.
pub fn init_pool(config: &SchedulerConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: config.busy_timeout,
        }))
        .build(manager)
        .with_context(|| format!("Failed to create DB pool for {}", config.database_url))?;

    let mut conn = pool
        .get()
        .context("Failed to acquire a connection for migrations")?;
    // WAL is persistent in the file, so one connection switching is enough
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .context("Failed to enable WAL journal")?;
    migrations::run_migrations(&mut conn)?;

    Ok(pool)
}
