//! Handlers for the verification gates and staff decisions.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use checa_postgres::PgClient;
use checa_postgres::model::NewAuditEvent;
use checa_postgres::query::{BookingDocumentRepository, DocumentTransition};
use checa_postgres::types::{AuditAction, DocumentType};
use uuid::Uuid;

use crate::extract::{CurrentAccount, Json, Path, ValidateJson};
use crate::handler::booking_documents::authorize_booking;
use crate::handler::request::{RejectDocumentRequest, VerifyDocumentRequest};
use crate::handler::response::{BookingDocumentView, VerificationStateView};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{ServiceState, VerificationCache};
use crate::worker::AuditHandle;

/// Tracing target for verification handlers.
const TRACING_TARGET: &str = "checa_server::handler::verification";

/// Returns the aggregated gate state for a booking.
///
/// Serves from the cache when the entry is fresh; otherwise recomputes from
/// the latest document of each type and caches the result.
async fn verification_state(
    State(pg_client): State<PgClient>,
    State(cache): State<VerificationCache>,
    CurrentAccount(account): CurrentAccount,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<VerificationStateView>> {
    let booking = authorize_booking(&pg_client, &account, booking_id).await?;

    if let Some(state) = cache.get(booking.id).await {
        return Ok(Json(VerificationStateView::new(booking.id, state)));
    }

    let latest = pg_client.get_latest_documents(booking.id).await?;
    let state = latest.verification_state(booking.has_workspace);
    cache.insert(booking.id, state).await;

    Ok(Json(VerificationStateView::new(booking.id, state)))
}

/// Maps a settle attempt onto a response, auditing successful decisions.
async fn settle_response(
    pg_client: &PgClient,
    cache: &VerificationCache,
    audit: &AuditHandle,
    verifier: Uuid,
    action: AuditAction,
    transition: DocumentTransition,
) -> Result<Json<BookingDocumentView>> {
    match transition {
        DocumentTransition::Updated(document) => {
            cache.invalidate(document.booking_id).await;
            audit.record(NewAuditEvent::for_document(verifier, action, document.id));

            tracing::info!(
                target: TRACING_TARGET,
                document_id = %document.id,
                booking_id = %document.booking_id,
                status = %document.verification_status,
                verified_by = %verifier,
                "Document settled"
            );

            let files = pg_client.list_document_blobs(document.id).await?;
            Ok(Json(BookingDocumentView::new(document, files)))
        }
        DocumentTransition::AlreadySettled(document) => {
            let details = format!(
                "document was already {} by another decision",
                document.verification_status
            );
            Err(Error::from(ErrorKind::Conflict).with_details(details))
        }
        DocumentTransition::NotFound => Err(ErrorKind::NotFound
            .with_details("unknown document")
            .into_static()),
    }
}

/// Marks a pending document as verified.
///
/// Receipt approvals may carry corrected payment details, which replace the
/// metadata the uploader declared.
async fn verify_document(
    State(pg_client): State<PgClient>,
    State(cache): State<VerificationCache>,
    State(audit): State<AuditHandle>,
    CurrentAccount(account): CurrentAccount,
    Path(document_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<VerifyDocumentRequest>,
) -> Result<Json<BookingDocumentView>> {
    let note = if request.has_corrections() {
        let document = pg_client
            .find_booking_document_by_id(document_id)
            .await?
            .ok_or_else(|| {
                ErrorKind::NotFound
                    .with_details("unknown document")
                    .into_static()
            })?;

        if document.document_type != DocumentType::PaymentReceipt {
            return Err(ErrorKind::BadRequest
                .with_details("payment corrections only apply to receipts")
                .into_static());
        }

        let mut metadata = document.payment_metadata();
        if let Some(method) = request.payment_method {
            metadata.payment_method = Some(method);
        }
        if let Some(amount) = request.amount {
            metadata.amount = Some(amount);
        }

        Some(metadata.encode_note())
    } else {
        request.notes
    };

    let transition = pg_client
        .verify_document(document_id, account.id, note)
        .await?;
    settle_response(
        &pg_client,
        &cache,
        &audit,
        account.id,
        AuditAction::DocumentVerified,
        transition,
    )
    .await
}

/// Marks a pending document as rejected with a reason for the customer.
async fn reject_document(
    State(pg_client): State<PgClient>,
    State(cache): State<VerificationCache>,
    State(audit): State<AuditHandle>,
    CurrentAccount(account): CurrentAccount,
    Path(document_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<RejectDocumentRequest>,
) -> Result<Json<BookingDocumentView>> {
    let reason = request.reason.trim().to_string();
    if reason.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_details("a rejection requires a reason")
            .into_static());
    }

    let transition = pg_client
        .reject_document(document_id, account.id, reason)
        .await?;
    settle_response(
        &pg_client,
        &cache,
        &audit,
        account.id,
        AuditAction::DocumentRejected,
        transition,
    )
    .await
}

/// Returns a [`Router`] with the customer-facing gate route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/bookings/{booking_id}/verification", get(verification_state))
}

/// Returns a [`Router`] with the staff decision routes.
pub fn staff_routes() -> Router<ServiceState> {
    Router::new()
        .route("/booking-docs/{document_id}/verify", post(verify_document))
        .route("/booking-docs/{document_id}/reject", post(reject_document))
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;
    use checa_postgres::model::BookingDocument;
    use checa_postgres::types::VerificationStatus;
    use time::OffsetDateTime;

    use super::*;
    use crate::service::ServiceConfig;

    fn settled_document() -> BookingDocument {
        BookingDocument {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            document_type: DocumentType::PaymentReceipt,
            verification_status: VerificationStatus::Rejected,
            form_number: None,
            note: None,
            rejection_reason: Some("amount does not match the invoice".to_string()),
            created_by: Uuid::new_v4(),
            verified_by: Some(Uuid::new_v4()),
            verified_at: Some(OffsetDateTime::now_utc()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    async fn settle(transition: DocumentTransition) -> Result<Json<BookingDocumentView>> {
        let config = ServiceConfig::default();
        let (state, _audit_worker) = ServiceState::from_config(&config).unwrap();

        settle_response(
            &PgClient::from_ref(&state),
            &VerificationCache::from_ref(&state),
            &AuditHandle::from_ref(&state),
            Uuid::new_v4(),
            AuditAction::DocumentVerified,
            transition,
        )
        .await
    }

    #[tokio::test]
    async fn losing_a_decision_race_is_a_conflict() {
        let error = settle(DocumentTransition::AlreadySettled(settled_document()))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn settling_an_unknown_document_is_not_found() {
        let error = settle(DocumentTransition::NotFound).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
