/// Database access layer
///
/// Pool construction with standardized timeouts and embedded migrations.
pub mod post_repo;

pub use post_repo::{PostStore, SqlxPostStore};

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the Postgres pool with bounded connect/acquire timeouts so a
/// store outage surfaces as an error instead of a hung request.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
}
