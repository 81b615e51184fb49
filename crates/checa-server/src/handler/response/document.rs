//! Response bodies for booking documents and verification state.

use checa_postgres::model::{BookingDocument, FileBlob};
use checa_postgres::types::{DocumentType, DocumentVerificationState, VerificationStatus};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// One stored file attached to a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBlobView {
    pub id: Uuid,
    pub url: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<FileBlob> for FileBlobView {
    fn from(blob: FileBlob) -> Self {
        Self {
            id: blob.id,
            url: blob.url,
            file_name: blob.file_name,
            mime_type: blob.mime_type,
            size_bytes: blob.size_bytes,
            created_at: blob.created_at,
        }
    }
}

/// One uploaded document with its attached files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDocumentView {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub document_type: DocumentType,
    pub verification_status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub files: Vec<FileBlobView>,
}

impl BookingDocumentView {
    /// Builds the view from a document row and its files.
    pub fn new(document: BookingDocument, files: Vec<FileBlob>) -> Self {
        Self {
            id: document.id,
            booking_id: document.booking_id,
            document_type: document.document_type,
            verification_status: document.verification_status,
            form_number: document.form_number,
            note: document.note,
            rejection_reason: document.rejection_reason,
            created_by: document.created_by,
            verified_by: document.verified_by,
            verified_at: document.verified_at,
            created_at: document.created_at,
            files: files.into_iter().map(FileBlobView::from).collect(),
        }
    }
}

/// Aggregated verification gates for a booking, plus the derived download
/// flag so clients never re-implement the gate logic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStateView {
    pub booking_id: Uuid,
    pub service_form_signed: VerificationStatus,
    pub workspace_form_signed: VerificationStatus,
    pub payment_receipt: VerificationStatus,
    pub downloads_unlocked: bool,
}

impl VerificationStateView {
    /// Builds the view from the computed gate state.
    pub fn new(booking_id: Uuid, state: DocumentVerificationState) -> Self {
        Self {
            booking_id,
            service_form_signed: state.service_form_signed,
            workspace_form_signed: state.workspace_form_signed,
            payment_receipt: state.payment_receipt,
            downloads_unlocked: state.downloads_unlocked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use checa_postgres::types::VerificationStatus;

    use super::*;

    #[test]
    fn verification_view_carries_download_flag() {
        let state = DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            None,
            Some(VerificationStatus::Verified),
            false,
        );

        let view = VerificationStateView::new(Uuid::new_v4(), state);
        assert!(view.downloads_unlocked);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["downloadsUnlocked"], true);
        assert_eq!(json["workspaceFormSigned"], "not_required");
    }
}
