use std::time::Duration;

use anyhow::{Context, Result, anyhow};

pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Server URL advertised in the OpenAPI document.
    pub public_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = get("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL missing"))?;
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let public_url =
            get("PUBLIC_URL").unwrap_or_else(|| "http://localhost:3000/api/v1".to_string());

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse::<u32>().context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => 5,
        };
        let acquire_secs: u64 = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("DB_ACQUIRE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 5,
        };
        let run_migrations = match get("RUN_MIGRATIONS") {
            Some(v) => parse_bool(&v).context("RUN_MIGRATIONS must be true or false")?,
            None => true,
        };

        Ok(Self {
            database_url,
            bind_addr,
            public_url,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            run_migrations,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("unrecognised boolean {other:?}")),
    }
}
