use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

pub type Database = SqlitePool;

pub async fn create_database_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<Database, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // In-memory stores live only as long as their connection, so connections are never recycled.
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!(%database_url, max_connections, "database connected");
    Ok(pool)
}

/// Brings the schema up to date. Already applied migrations are skipped, so this is safe to repeat.
pub async fn run_migrations(pool: &Database) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("migrations executed");
    Ok(())
}
