use dotenvy::dotenv;
use poem::{Server, listener::TcpListener};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

pub mod app_error;
pub mod config;
pub mod db;
pub mod models;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // doesn't do anything in production, since env vars are included in the process
    let _ = dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let store = db::connect_store(&config).await?;
    let state = AppState::new(store);

    let app = routes::build_app(state, config.public_url.clone());

    info!(addr = %config.bind_addr, "trivia api listening");
    Server::new(TcpListener::bind(config.bind_addr.clone()))
        .run(app)
        .await?;

    Ok(())
}
