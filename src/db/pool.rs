use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::error::AppResult;

/// Creates a SQLite connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations to the given pool
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}
