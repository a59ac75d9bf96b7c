use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::config::Config;
use crate::repos::memory::MemoryStore;
use crate::repos::{DynStore, PgStore};

pub type Db = Pool<Postgres>;

pub async fn init_pool(config: &Config) -> anyhow::Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    Ok(pool)
}

pub async fn connect_store(config: &Config) -> anyhow::Result<DynStore> {
    if config.uses_memory_store() {
        info!("using in-memory store");
        return Ok(Arc::new(MemoryStore::with_default_categories()));
    }

    let pool = init_pool(config).await?;
    Ok(Arc::new(PgStore::new(pool)))
}
