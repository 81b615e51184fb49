//! Booking document model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::booking_documents;
use crate::types::{DocumentType, PaymentMetadata, VerificationStatus, parse_payment_metadata};

/// Booking document model representing an uploaded document of a given type.
///
/// Documents are append-only: a re-upload inserts a new row and the latest
/// row per type supersedes older ones for gate computation.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = booking_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingDocument {
    /// Unique document identifier
    pub id: Uuid,
    /// Booking this document belongs to
    pub booking_id: Uuid,
    /// Fixed document type slot
    pub document_type: DocumentType,
    /// Current verification status
    pub verification_status: VerificationStatus,
    /// Form number, e.g. the service request form serial
    pub form_number: Option<String>,
    /// Free-text note; receipt documents carry payment metadata here as JSON
    pub note: Option<String>,
    /// Reason supplied by the verifier on rejection
    pub rejection_reason: Option<String>,
    /// Account that uploaded the document
    pub created_by: Uuid,
    /// Account that verified or rejected the document
    pub verified_by: Option<Uuid>,
    /// Timestamp of the verify or reject decision
    pub verified_at: Option<OffsetDateTime>,
    /// Timestamp when the document was uploaded
    pub created_at: OffsetDateTime,
}

impl BookingDocument {
    /// Returns whether this document still awaits a verifier decision.
    pub fn is_pending_verification(&self) -> bool {
        self.verification_status == VerificationStatus::PendingVerification
    }

    /// Returns whether a verify or reject decision has been recorded.
    pub fn is_settled(&self) -> bool {
        self.verification_status.is_terminal()
    }

    /// Parses the payment metadata embedded in the note column.
    pub fn payment_metadata(&self) -> PaymentMetadata {
        parse_payment_metadata(self.note.as_deref(), self.id)
    }

    /// Returns the document age in whole days at the given instant.
    ///
    /// Partial days round up, so a document uploaded 3.5 days ago is 4 days
    /// old. Clock skew producing a future `created_at` yields zero.
    pub fn age_in_days_at(&self, now: OffsetDateTime) -> i64 {
        let elapsed = (now - self.created_at).whole_seconds();
        if elapsed <= 0 {
            0
        } else {
            (elapsed + 86_399) / 86_400
        }
    }
}

/// New booking document model for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = booking_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBookingDocument {
    /// Booking this document belongs to
    pub booking_id: Uuid,
    /// Fixed document type slot
    pub document_type: DocumentType,
    /// Initial verification status
    pub verification_status: VerificationStatus,
    /// Form number, if the type carries one
    pub form_number: Option<String>,
    /// Free-text note or encoded payment metadata
    pub note: Option<String>,
    /// Account uploading the document
    pub created_by: Uuid,
}

impl NewBookingDocument {
    /// Creates a new upload in the status appropriate for its type.
    ///
    /// Types that require a verifier decision start in
    /// `pending_verification`; the rest are verified on arrival.
    pub fn new(booking_id: Uuid, document_type: DocumentType, created_by: Uuid) -> Self {
        let verification_status = if document_type.requires_verification() {
            VerificationStatus::PendingVerification
        } else {
            VerificationStatus::Verified
        };

        Self {
            booking_id,
            document_type,
            verification_status,
            form_number: None,
            note: None,
            created_by,
        }
    }

    /// Attaches a form number.
    pub fn with_form_number(mut self, form_number: impl Into<String>) -> Self {
        self.form_number = Some(form_number.into());
        self
    }

    /// Attaches a free-text note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attaches encoded payment metadata as the note.
    pub fn with_payment_metadata(mut self, metadata: &PaymentMetadata) -> Self {
        self.note = Some(metadata.encode_note());
        self
    }
}

/// Update [`BookingDocument`] model for settling a verification decision.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = booking_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettleBookingDocument {
    /// Terminal verification status
    pub verification_status: VerificationStatus,
    /// Reason for rejection, cleared on verification
    pub rejection_reason: Option<Option<String>>,
    /// Replacement note, e.g. corrected payment metadata; `None` keeps the
    /// uploaded note untouched
    pub note: Option<String>,
    /// Deciding verifier account
    pub verified_by: Uuid,
    /// Decision timestamp
    pub verified_at: OffsetDateTime,
}

impl SettleBookingDocument {
    /// Builds the changeset for an approval.
    pub fn verified(verified_by: Uuid) -> Self {
        Self {
            verification_status: VerificationStatus::Verified,
            rejection_reason: Some(None),
            note: None,
            verified_by,
            verified_at: OffsetDateTime::now_utc(),
        }
    }

    /// Builds the changeset for a rejection with the given reason.
    pub fn rejected(verified_by: Uuid, reason: impl Into<String>) -> Self {
        Self {
            verification_status: VerificationStatus::Rejected,
            rejection_reason: Some(Some(reason.into())),
            note: None,
            verified_by,
            verified_at: OffsetDateTime::now_utc(),
        }
    }

    /// Replaces the document note as part of the decision.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;

    fn document(created_at: OffsetDateTime) -> BookingDocument {
        BookingDocument {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            document_type: DocumentType::PaymentReceipt,
            verification_status: VerificationStatus::PendingVerification,
            form_number: None,
            note: None,
            rejection_reason: None,
            created_by: Uuid::new_v4(),
            verified_by: None,
            verified_at: None,
            created_at,
        }
    }

    #[test]
    fn age_rounds_partial_days_up() {
        let now = OffsetDateTime::now_utc();
        let doc = document(now - Duration::hours(84));
        assert_eq!(doc.age_in_days_at(now), 4);
    }

    #[test]
    fn age_of_fresh_document_is_zero() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(document(now).age_in_days_at(now), 0);
        assert_eq!(document(now + Duration::minutes(5)).age_in_days_at(now), 0);
    }

    #[test]
    fn age_of_exact_day_boundary() {
        let now = OffsetDateTime::now_utc();
        let doc = document(now - Duration::days(2));
        assert_eq!(doc.age_in_days_at(now), 2);
    }

    #[test]
    fn new_upload_status_follows_document_type() {
        let booking_id = Uuid::new_v4();
        let uploader = Uuid::new_v4();

        let receipt = NewBookingDocument::new(booking_id, DocumentType::PaymentReceipt, uploader);
        assert_eq!(
            receipt.verification_status,
            VerificationStatus::PendingVerification
        );

        let invoice = NewBookingDocument::new(booking_id, DocumentType::Invoice, uploader);
        assert_eq!(invoice.verification_status, VerificationStatus::Verified);
    }

    #[test]
    fn rejection_changeset_carries_reason() {
        let verifier = Uuid::new_v4();
        let settle = SettleBookingDocument::rejected(verifier, "receipt is illegible");
        assert_eq!(settle.verification_status, VerificationStatus::Rejected);
        assert_eq!(
            settle.rejection_reason,
            Some(Some("receipt is illegible".to_string()))
        );

        let settle = SettleBookingDocument::verified(verifier);
        assert_eq!(settle.rejection_reason, Some(None));
    }
}
