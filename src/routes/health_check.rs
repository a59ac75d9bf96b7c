use std::time::Duration;

use poem_openapi::payload::Json;
use poem_openapi::{Object, OpenApi};
use serde::Serialize;

use crate::state::AppState;

const STORE_PING_TIMEOUT: Duration = Duration::from_secs(2);

pub struct HealthCheckApi {
    pub state: AppState,
}

#[derive(Debug, Clone, Copy, Serialize, Object)]
pub struct HealthCheckResponse {
    db_ok: bool,
    server_ok: bool,
}

#[OpenApi]
impl HealthCheckApi {
    /// Health check endpoint
    #[oai(path = "/health_check", method = "get", operation_id = "health_check")]
    async fn health_check(&self) -> poem::Result<Json<HealthCheckResponse>> {
        let db_ok = matches!(
            tokio::time::timeout(STORE_PING_TIMEOUT, self.state.store.ping()).await,
            Ok(Ok(()))
        );

        Ok(Json(HealthCheckResponse {
            db_ok,
            server_ok: true,
        }))
    }
}
