//! Booking documents repository: uploads, per-type latest state, and
//! verification decisions.

use std::collections::HashMap;
use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{
    Booking, BookingDocument, FileBlob, NewBookingDocument, NewFileBlob, SettleBookingDocument,
};
use crate::types::{DocumentType, DocumentVerificationState, VerificationStatus};
use crate::{PgClient, PgError, PgResult, schema};

/// Outcome of a verify or reject attempt.
///
/// Decisions race with each other and with re-uploads, so the update is a
/// single conditional statement: it only lands while the document is still
/// `pending_verification`. Losing the race is reported, not retried.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentTransition {
    /// The decision landed and this is the updated row.
    Updated(BookingDocument),
    /// The document exists but was already settled; the current row is
    /// returned so callers can report its state.
    AlreadySettled(BookingDocument),
    /// No document with the given identifier exists.
    NotFound,
}

/// The most recent document per type for a single booking.
#[derive(Debug, Default, Clone)]
pub struct LatestDocuments {
    inner: HashMap<DocumentType, BookingDocument>,
}

impl LatestDocuments {
    /// Folds rows ordered newest-first, keeping the first row per type.
    fn from_rows(rows: Vec<BookingDocument>) -> Self {
        let mut inner = HashMap::new();
        for row in rows {
            inner.entry(row.document_type).or_insert(row);
        }
        Self { inner }
    }

    /// Returns the latest document of the given type, if any was uploaded.
    pub fn get(&self, document_type: DocumentType) -> Option<&BookingDocument> {
        self.inner.get(&document_type)
    }

    /// Returns the verification status of the latest document of the type.
    pub fn status(&self, document_type: DocumentType) -> Option<VerificationStatus> {
        self.get(document_type).map(|doc| doc.verification_status)
    }

    /// Computes the booking's gate state from the latest documents.
    pub fn verification_state(&self, has_workspace: bool) -> DocumentVerificationState {
        DocumentVerificationState::new(
            self.status(DocumentType::ServiceFormSigned),
            self.status(DocumentType::WorkspaceFormSigned),
            self.status(DocumentType::PaymentReceipt),
            has_workspace,
        )
    }

    /// Iterates over the latest documents in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &BookingDocument> {
        self.inner.values()
    }
}

/// Repository for booking document database operations.
///
/// Uploads are append-only; the latest row per type supersedes older rows
/// for gate computation, and verify/reject decisions settle exactly one
/// pending row.
pub trait BookingDocumentRepository {
    /// Creates a new document record.
    fn create_booking_document(
        &self,
        new_document: NewBookingDocument,
    ) -> impl Future<Output = PgResult<BookingDocument>> + Send;

    /// Attaches a stored file to a document.
    fn create_document_blob(
        &self,
        new_blob: NewFileBlob,
    ) -> impl Future<Output = PgResult<FileBlob>> + Send;

    /// Finds a document by its unique identifier.
    fn find_booking_document_by_id(
        &self,
        document_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<BookingDocument>>> + Send;

    /// Finds a document together with its booking.
    ///
    /// Used for ownership checks at the database level.
    fn find_document_with_booking(
        &self,
        document_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<(BookingDocument, Booking)>>> + Send;

    /// Lists a booking's documents, newest first, optionally restricted to
    /// one type.
    fn list_booking_documents(
        &self,
        booking_id: Uuid,
        document_type: Option<DocumentType>,
    ) -> impl Future<Output = PgResult<Vec<BookingDocument>>> + Send;

    /// Retrieves the latest document per type for a booking.
    fn get_latest_documents(
        &self,
        booking_id: Uuid,
    ) -> impl Future<Output = PgResult<LatestDocuments>> + Send;

    /// Lists the stored files attached to a document.
    fn list_document_blobs(
        &self,
        document_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<FileBlob>>> + Send;

    /// Lists the stored files for many documents in a single query.
    fn list_blobs_for_documents(
        &self,
        document_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<Vec<FileBlob>>> + Send;

    /// Marks a pending document as verified, optionally replacing the note
    /// with corrected payment metadata.
    fn verify_document(
        &self,
        document_id: Uuid,
        verified_by: Uuid,
        note: Option<String>,
    ) -> impl Future<Output = PgResult<DocumentTransition>> + Send;

    /// Marks a pending document as rejected with a reason.
    fn reject_document(
        &self,
        document_id: Uuid,
        verified_by: Uuid,
        reason: String,
    ) -> impl Future<Output = PgResult<DocumentTransition>> + Send;
}

impl BookingDocumentRepository for PgClient {
    async fn create_booking_document(
        &self,
        new_document: NewBookingDocument,
    ) -> PgResult<BookingDocument> {
        let mut conn = self.get_connection().await?;

        use schema::booking_documents;

        let document = diesel::insert_into(booking_documents::table)
            .values(&new_document)
            .returning(BookingDocument::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(document)
    }

    async fn create_document_blob(&self, new_blob: NewFileBlob) -> PgResult<FileBlob> {
        let mut conn = self.get_connection().await?;

        use schema::file_blobs;

        let blob = diesel::insert_into(file_blobs::table)
            .values(&new_blob)
            .returning(FileBlob::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(blob)
    }

    async fn find_booking_document_by_id(
        &self,
        document_id: Uuid,
    ) -> PgResult<Option<BookingDocument>> {
        let mut conn = self.get_connection().await?;

        use schema::booking_documents::{self, dsl};

        let document = booking_documents::table
            .filter(dsl::id.eq(document_id))
            .select(BookingDocument::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(document)
    }

    async fn find_document_with_booking(
        &self,
        document_id: Uuid,
    ) -> PgResult<Option<(BookingDocument, Booking)>> {
        let mut conn = self.get_connection().await?;

        use schema::{booking_documents, bookings};

        let pair = booking_documents::table
            .inner_join(bookings::table)
            .filter(booking_documents::id.eq(document_id))
            .select((BookingDocument::as_select(), Booking::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(pair)
    }

    async fn list_booking_documents(
        &self,
        booking_id: Uuid,
        document_type: Option<DocumentType>,
    ) -> PgResult<Vec<BookingDocument>> {
        let mut conn = self.get_connection().await?;

        use schema::booking_documents::{self, dsl};

        let mut query = booking_documents::table
            .filter(dsl::booking_id.eq(booking_id))
            .into_boxed();

        if let Some(document_type) = document_type {
            query = query.filter(dsl::document_type.eq(document_type));
        }

        let documents = query
            .order(dsl::created_at.desc())
            .select(BookingDocument::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(documents)
    }

    async fn get_latest_documents(&self, booking_id: Uuid) -> PgResult<LatestDocuments> {
        let mut conn = self.get_connection().await?;

        use schema::booking_documents::{self, dsl};

        let rows = booking_documents::table
            .filter(dsl::booking_id.eq(booking_id))
            .order(dsl::created_at.desc())
            .select(BookingDocument::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(LatestDocuments::from_rows(rows))
    }

    async fn list_document_blobs(&self, document_id: Uuid) -> PgResult<Vec<FileBlob>> {
        let mut conn = self.get_connection().await?;

        use schema::file_blobs::{self, dsl};

        let blobs = file_blobs::table
            .filter(dsl::document_id.eq(document_id))
            .order(dsl::created_at.desc())
            .select(FileBlob::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(blobs)
    }

    async fn list_blobs_for_documents(&self, document_ids: &[Uuid]) -> PgResult<Vec<FileBlob>> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;

        use schema::file_blobs::{self, dsl};

        let blobs = file_blobs::table
            .filter(dsl::document_id.eq_any(document_ids))
            .order(dsl::created_at.desc())
            .select(FileBlob::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(blobs)
    }

    async fn verify_document(
        &self,
        document_id: Uuid,
        verified_by: Uuid,
        note: Option<String>,
    ) -> PgResult<DocumentTransition> {
        let mut changeset = SettleBookingDocument::verified(verified_by);
        if let Some(note) = note {
            changeset = changeset.with_note(note);
        }

        settle_document(self, document_id, changeset).await
    }

    async fn reject_document(
        &self,
        document_id: Uuid,
        verified_by: Uuid,
        reason: String,
    ) -> PgResult<DocumentTransition> {
        settle_document(
            self,
            document_id,
            SettleBookingDocument::rejected(verified_by, reason),
        )
        .await
    }
}

/// Applies a decision changeset only while the row is still pending.
async fn settle_document(
    client: &PgClient,
    document_id: Uuid,
    changeset: SettleBookingDocument,
) -> PgResult<DocumentTransition> {
    let mut conn = client.get_connection().await?;

    use schema::booking_documents::{self, dsl};

    let updated = diesel::update(
        booking_documents::table
            .filter(dsl::id.eq(document_id))
            .filter(dsl::verification_status.eq(VerificationStatus::PendingVerification)),
    )
    .set(&changeset)
    .returning(BookingDocument::as_returning())
    .get_result(&mut conn)
    .await
    .optional()
    .map_err(PgError::from)?;

    if let Some(document) = updated {
        return Ok(DocumentTransition::Updated(document));
    }

    let current = booking_documents::table
        .filter(dsl::id.eq(document_id))
        .select(BookingDocument::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(PgError::from)?;

    Ok(match current {
        Some(document) => DocumentTransition::AlreadySettled(document),
        None => DocumentTransition::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn row(
        booking_id: Uuid,
        document_type: DocumentType,
        status: VerificationStatus,
        age_hours: i64,
    ) -> BookingDocument {
        BookingDocument {
            id: Uuid::new_v4(),
            booking_id,
            document_type,
            verification_status: status,
            form_number: None,
            note: None,
            rejection_reason: None,
            created_by: Uuid::new_v4(),
            verified_by: None,
            verified_at: None,
            created_at: OffsetDateTime::now_utc() - time::Duration::hours(age_hours),
        }
    }

    #[test]
    fn latest_documents_keep_newest_per_type() {
        let booking_id = Uuid::new_v4();
        let newest = row(
            booking_id,
            DocumentType::PaymentReceipt,
            VerificationStatus::PendingVerification,
            1,
        );
        let older = row(
            booking_id,
            DocumentType::PaymentReceipt,
            VerificationStatus::Rejected,
            48,
        );

        // Rows arrive ordered newest first, as the query produces them.
        let latest = LatestDocuments::from_rows(vec![newest.clone(), older]);

        assert_eq!(latest.get(DocumentType::PaymentReceipt), Some(&newest));
        assert_eq!(
            latest.status(DocumentType::PaymentReceipt),
            Some(VerificationStatus::PendingVerification)
        );
        assert_eq!(latest.status(DocumentType::Invoice), None);
    }

    #[test]
    fn reupload_supersedes_rejection_in_gate_state() {
        let booking_id = Uuid::new_v4();
        let rows = vec![
            row(
                booking_id,
                DocumentType::PaymentReceipt,
                VerificationStatus::PendingVerification,
                1,
            ),
            row(
                booking_id,
                DocumentType::ServiceFormSigned,
                VerificationStatus::Verified,
                5,
            ),
            row(
                booking_id,
                DocumentType::PaymentReceipt,
                VerificationStatus::Rejected,
                48,
            ),
        ];

        let state = LatestDocuments::from_rows(rows).verification_state(false);

        assert_eq!(state.service_form_signed, VerificationStatus::Verified);
        assert_eq!(
            state.payment_receipt,
            VerificationStatus::PendingVerification
        );
        assert!(!state.downloads_unlocked());
    }

    #[test]
    fn empty_booking_has_pending_upload_gates() {
        let state = LatestDocuments::from_rows(Vec::new()).verification_state(true);

        assert_eq!(state.service_form_signed, VerificationStatus::PendingUpload);
        assert_eq!(
            state.workspace_form_signed,
            VerificationStatus::PendingUpload
        );
        assert!(!state.downloads_unlocked());
    }
}
