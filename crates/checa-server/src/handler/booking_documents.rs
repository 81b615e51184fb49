//! Handlers for uploading and listing booking documents.

use std::collections::HashMap;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use checa_postgres::PgClient;
use checa_postgres::model::{Account, Booking, NewBookingDocument, NewFileBlob};
use checa_postgres::query::{BookingDocumentRepository, BookingRepository};
use checa_postgres::types::DocumentType;
use uuid::Uuid;

use crate::extract::{CurrentAccount, Json, Path, Query, ValidateJson};
use crate::handler::request::{ListDocumentsQuery, PaymentDetailsRequest, UploadDocumentRequest};
use crate::handler::response::BookingDocumentView;
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, VerificationCache};

/// Tracing target for booking document handlers.
const TRACING_TARGET: &str = "checa_server::handler::booking_documents";

/// Loads a booking and checks the account may see it.
///
/// Customers only reach their own bookings; staff reach all of them.
pub(crate) async fn authorize_booking(
    pg_client: &PgClient,
    account: &Account,
    booking_id: Uuid,
) -> Result<Booking> {
    let booking = pg_client
        .find_booking_by_id(booking_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_details("unknown booking").into_static())?;

    if !booking.is_owned_by(account.id) && !account.role.can_verify_documents() {
        return Err(ErrorKind::Forbidden.into_error());
    }

    Ok(booking)
}

/// Lists a booking's documents, newest first.
async fn list_documents(
    State(pg_client): State<PgClient>,
    CurrentAccount(account): CurrentAccount,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<BookingDocumentView>>> {
    let booking = authorize_booking(&pg_client, &account, booking_id).await?;

    let documents = pg_client
        .list_booking_documents(booking.id, query.document_type)
        .await?;

    let document_ids: Vec<Uuid> = documents.iter().map(|doc| doc.id).collect();
    let mut blobs: HashMap<Uuid, Vec<_>> = HashMap::new();
    for blob in pg_client.list_blobs_for_documents(&document_ids).await? {
        blobs.entry(blob.document_id).or_default().push(blob);
    }

    let views = documents
        .into_iter()
        .map(|document| {
            let files = blobs.remove(&document.id).unwrap_or_default();
            BookingDocumentView::new(document, files)
        })
        .collect();

    Ok(Json(views))
}

/// Returns the latest document of one type, the row that drives the gates.
async fn latest_document(
    State(pg_client): State<PgClient>,
    CurrentAccount(account): CurrentAccount,
    Path((booking_id, document_type)): Path<(Uuid, DocumentType)>,
) -> Result<Json<BookingDocumentView>> {
    let booking = authorize_booking(&pg_client, &account, booking_id).await?;

    let latest = pg_client.get_latest_documents(booking.id).await?;
    let document = latest.get(document_type).cloned().ok_or_else(|| {
        ErrorKind::NotFound
            .with_details("no document of this type has been uploaded")
            .into_static()
    })?;

    let files = pg_client.list_document_blobs(document.id).await?;
    Ok(Json(BookingDocumentView::new(document, files)))
}

/// Uploads a new document into one of the booking's type slots.
///
/// Re-uploads are append-only: the new row supersedes older ones of the
/// same type in every gate computation.
async fn upload_document(
    State(pg_client): State<PgClient>,
    State(cache): State<VerificationCache>,
    CurrentAccount(account): CurrentAccount,
    Path(booking_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<BookingDocumentView>)> {
    let booking = authorize_booking(&pg_client, &account, booking_id).await?;

    let document_type = request.document_type;
    if !account.role.can_verify_documents() && !document_type.is_customer_upload() {
        return Err(ErrorKind::Forbidden
            .with_details("this document type is issued by the portal")
            .into_static());
    }

    if document_type.is_workspace_form() && !booking.has_workspace {
        return Err(ErrorKind::BadRequest
            .with_details("booking has no workspace rental component")
            .into_static());
    }

    let payment = request
        .payment
        .map(PaymentDetailsRequest::into_metadata)
        .filter(|metadata| !metadata.is_empty());
    if payment.is_some() && document_type != DocumentType::PaymentReceipt {
        return Err(ErrorKind::BadRequest
            .with_details("payment details are only accepted on receipt uploads")
            .into_static());
    }
    if payment.is_some() && request.note.is_some() {
        return Err(ErrorKind::BadRequest
            .with_details("a receipt carries either payment details or a note, not both")
            .into_static());
    }

    let mut new_document = NewBookingDocument::new(booking.id, document_type, account.id);
    if let Some(form_number) = request.form_number {
        new_document = new_document.with_form_number(form_number);
    }
    if let Some(metadata) = payment {
        new_document = new_document.with_payment_metadata(&metadata);
    } else if let Some(note) = request.note {
        new_document = new_document.with_note(note);
    }

    let document = pg_client.create_booking_document(new_document).await?;

    let blob = pg_client
        .create_document_blob(NewFileBlob {
            document_id: document.id,
            storage_key: request.file.storage_key,
            url: request.file.url,
            file_name: request.file.file_name,
            mime_type: request.file.mime_type,
            size_bytes: request.file.size_bytes,
        })
        .await?;

    cache.invalidate(booking.id).await;

    tracing::info!(
        target: TRACING_TARGET,
        booking_id = %booking.id,
        document_id = %document.id,
        document_type = %document.document_type,
        uploaded_by = %account.id,
        "Document uploaded"
    );

    let view = BookingDocumentView::new(document, vec![blob]);
    Ok((StatusCode::CREATED, Json(view)))
}

/// Returns a [`Router`] with all booking document routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route(
            "/bookings/{booking_id}/documents",
            get(list_documents).post(upload_document),
        )
        .route(
            "/bookings/{booking_id}/documents/{document_type}",
            get(latest_document),
        )
}
