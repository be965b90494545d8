//! Postgres persistence for todos.
//!
//! Provides pool construction, the startup ping loop, embedded migrations, and
//! [`TodoRepo`], the SQL implementation of the `Storer` capability.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub use repositories::TodoRepo;

pub type DbPool = sqlx::PgPool;

/// Extra wait added after each failed ping: attempt `i` sleeps `i` steps.
pub const PING_BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Create a connection pool from a database URL.
///
/// No connection is opened here; call [`wait_for_db`] to block until the
/// server is reachable.
pub fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect_lazy(database_url)
}

/// Retry connecting with linear backoff until the database answers, then run
/// [`health_check`].
///
/// This never gives up on its own; callers bound it with a timeout.
pub async fn wait_for_db(pool: &DbPool) -> Result<(), sqlx::Error> {
    for attempt in 1u32.. {
        match pool.acquire().await {
            Ok(_) => break,
            Err(err) => {
                tracing::debug!(attempt, error = %err, "Database not ready");
                tokio::time::sleep(PING_BACKOFF_STEP * attempt).await;
            }
        }
    }

    health_check(pool).await
}

/// Run a trivial query to confirm the database is usable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT true")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply the migrations embedded from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
