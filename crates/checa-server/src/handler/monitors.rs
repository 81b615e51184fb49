//! Health and readiness endpoints.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use checa_postgres::PgClient;
use serde::Serialize;

use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database_pool_size: usize,
    database_pool_available: usize,
}

/// Reports liveness and connection pool headroom.
///
/// Does not issue a query; a saturated pool shows up in the numbers without
/// the probe itself competing for a connection.
async fn health(State(pg_client): State<PgClient>) -> Result<Json<HealthResponse>> {
    let pool_status = pg_client.pool_status();

    Ok(Json(HealthResponse {
        status: "healthy",
        database_pool_size: pool_status.size,
        database_pool_available: pool_status.available,
    }))
}

/// Returns a [`Router`] with all monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}
