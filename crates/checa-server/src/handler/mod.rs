//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes are grouped by who may call them: monitoring endpoints are public,
//! booking and verification views require an authenticated account, and the
//! receipt review and settings routes additionally require a staff role.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod booking_documents;
mod error;
mod monitors;
mod payment_receipts;
mod request;
mod response;
mod settings;
mod verification;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with the routes any authenticated account may call.
fn customer_routes() -> Router<ServiceState> {
    Router::new()
        .merge(booking_documents::routes())
        .merge(verification::routes())
}

/// Returns a [`Router`] with the staff-only routes.
fn staff_routes() -> Router<ServiceState> {
    Router::new()
        .merge(verification::staff_routes())
        .merge(payment_receipts::routes())
        .merge(settings::routes())
}

/// Returns a [`Router`] with all routes, nested under `/api`.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let api = Router::new()
        .merge(customer_routes().with_authentication(state.clone()))
        .merge(staff_routes().with_staff_authentication(state))
        .merge(monitors::routes());

    Router::new().nest("/api", api).fallback(handler)
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] with the default router and state.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        let config = ServiceConfig::default();
        let (state, _audit_worker) = ServiceState::from_config(&config)?;
        let app = routes(state.clone()).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn health_is_public() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn private_routes_require_a_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let booking_id = uuid::Uuid::new_v4();
        let response = server
            .get(&format!("/api/bookings/{booking_id}/verification"))
            .await;
        response.assert_status_unauthorized();

        let response = server.get("/api/payment-receipts/pending").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server.get("/api/does-not-exist").await;
        response.assert_status_not_found();
        Ok(())
    }
}
