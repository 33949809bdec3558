use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::PoolConfig;

/// Opens the shared pool and brings the schema up to date.
pub async fn connect(database_url: &str, pool: &PoolConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(pool.max_open)
        .min_connections(pool.max_idle)
        .max_lifetime(pool.max_lifetime)
        .connect(database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    Ok(db)
}
