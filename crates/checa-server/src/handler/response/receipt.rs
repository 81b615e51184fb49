//! Response bodies for the finance receipt views.

use checa_postgres::query::{ReceiptPage, ReceiptRecord};
use checa_postgres::types::{PaymentMethod, VerificationStatus};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::handler::response::FileBlobView;

/// One receipt row in the pending queue or history view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub booking_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_form_number: Option<String>,

    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Declared amount; `"0"` when the uploader left it out
    pub amount: String,
    pub payment_method: PaymentMethod,
    /// Declared payment date, falling back to the upload timestamp
    pub payment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier_name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<OffsetDateTime>,

    /// Whole days since upload, partial days rounded up
    pub age_days: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
    pub files: Vec<FileBlobView>,
}

impl ReceiptView {
    /// Builds the view from a joined record, evaluating ages at `now`.
    pub fn new(record: ReceiptRecord, now: OffsetDateTime) -> Self {
        let metadata = record.document.payment_metadata();
        let payment_date = metadata.payment_date.clone().unwrap_or_else(|| {
            record
                .document
                .created_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default()
        });

        Self {
            id: record.document.id,
            booking_id: record.booking.id,
            booking_reference: record.booking.reference_number.clone(),
            service_form_number: record.service_form_number,

            customer_name: record.customer.display_name(),
            customer_email: record.customer.email.clone(),
            organization: record
                .customer
                .organization_display_name()
                .map(str::to_string),

            amount: metadata.amount_or_default().to_string(),
            payment_method: metadata.method_or_default(),
            payment_date,
            reference_number: metadata.reference_number,

            status: record.document.verification_status,
            rejection_reason: record.document.rejection_reason.clone(),
            verifier_name: record.verifier.map(|verifier| verifier.display_name()),
            verified_at: record.document.verified_at,

            age_days: record.document.age_in_days_at(now),
            uploaded_at: record.document.created_at,
            files: record.files.into_iter().map(FileBlobView::from).collect(),
        }
    }
}

/// One page of receipts plus the unpaginated total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptListResponse {
    pub items: Vec<ReceiptView>,
    pub total: i64,
}

impl ReceiptListResponse {
    /// Builds the list response from a repository page.
    pub fn new(page: ReceiptPage, now: OffsetDateTime) -> Self {
        Self {
            items: page
                .records
                .into_iter()
                .map(|record| ReceiptView::new(record, now))
                .collect(),
            total: page.total,
        }
    }
}
