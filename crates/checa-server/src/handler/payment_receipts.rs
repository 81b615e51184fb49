//! Handlers for the finance receipt queue and decision history.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use checa_postgres::PgClient;
use checa_postgres::query::PaymentReceiptRepository;
use time::OffsetDateTime;

use crate::extract::{Json, Query};
use crate::handler::Result;
use crate::handler::request::ReceiptListQuery;
use crate::handler::response::ReceiptListResponse;
use crate::service::ServiceState;

/// Lists receipts awaiting a decision, oldest upload first.
async fn pending_receipts(
    State(pg_client): State<PgClient>,
    Query(query): Query<ReceiptListQuery>,
) -> Result<Json<ReceiptListResponse>> {
    let page = pg_client
        .list_pending_receipts(query.filter(), query.pagination())
        .await?;

    Ok(Json(ReceiptListResponse::new(page, OffsetDateTime::now_utc())))
}

/// Lists settled receipts, most recent decision first.
async fn receipt_history(
    State(pg_client): State<PgClient>,
    Query(query): Query<ReceiptListQuery>,
) -> Result<Json<ReceiptListResponse>> {
    let page = pg_client
        .list_receipt_history(query.filter(), query.pagination())
        .await?;

    Ok(Json(ReceiptListResponse::new(page, OffsetDateTime::now_utc())))
}

/// Returns a [`Router`] with all receipt review routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/payment-receipts/pending", get(pending_receipts))
        .route("/payment-receipts/history", get(receipt_history))
}
