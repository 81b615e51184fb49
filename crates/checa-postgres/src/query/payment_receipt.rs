//! Payment receipts repository: the finance verification queue and the
//! decision history.
//!
//! Both views join receipts with their booking and customer account so the
//! queue can be searched by who uploaded, not just what was uploaded.

use std::collections::HashMap;
use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use time::OffsetDateTime;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Account, Booking, BookingDocument, FileBlob};
use crate::types::{DocumentType, PaymentMethod, VerificationStatus};
use crate::{PgClient, PgError, PgResult, schema};

/// The document types that carry a service form number.
const SERVICE_FORM_TYPES: [DocumentType; 2] = [
    DocumentType::ServiceFormUnsigned,
    DocumentType::ServiceFormSigned,
];

/// Filters applied to both receipt views.
#[derive(Debug, Default, Clone)]
pub struct ReceiptFilter {
    /// Case-insensitive substring over customer name, email, booking
    /// reference, and service form number.
    pub search: Option<String>,
    /// Restrict to receipts declaring this payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Restrict the history view to one decision outcome.
    pub status: Option<VerificationStatus>,
    /// Lower bound on the decision timestamp, inclusive.
    pub verified_from: Option<OffsetDateTime>,
    /// Upper bound on the decision timestamp, inclusive.
    pub verified_to: Option<OffsetDateTime>,
}

impl ReceiptFilter {
    /// Drops the decision-date bounds.
    ///
    /// Undecided rows have no `verified_at` to compare against, so the
    /// pending queue ignores any supplied range instead of matching nothing.
    pub fn without_decision_dates(mut self) -> Self {
        self.verified_from = None;
        self.verified_to = None;
        self
    }
}

/// One receipt with everything the finance views display.
#[derive(Debug, Clone)]
pub struct ReceiptRecord {
    /// The receipt document itself
    pub document: BookingDocument,
    /// The booking the receipt pays for
    pub booking: Booking,
    /// The customer who owns the booking
    pub customer: Account,
    /// The admin who settled the receipt, for history rows
    pub verifier: Option<Account>,
    /// Form number of the booking's most recent service request form
    pub service_form_number: Option<String>,
    /// Stored files attached to the receipt
    pub files: Vec<FileBlob>,
}

/// One page of receipt records plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct ReceiptPage {
    /// Records for the requested page
    pub records: Vec<ReceiptRecord>,
    /// Total matching records across all pages
    pub total: i64,
}

/// Repository for the receipt verification queue and history.
pub trait PaymentReceiptRepository {
    /// Lists receipts awaiting a decision, oldest upload first.
    fn list_pending_receipts(
        &self,
        filter: ReceiptFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<ReceiptPage>> + Send;

    /// Lists settled receipts, most recent decision first.
    fn list_receipt_history(
        &self,
        filter: ReceiptFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<ReceiptPage>> + Send;
}

impl PaymentReceiptRepository for PgClient {
    async fn list_pending_receipts(
        &self,
        filter: ReceiptFilter,
        pagination: Pagination,
    ) -> PgResult<ReceiptPage> {
        load_receipt_page(
            self,
            &[VerificationStatus::PendingVerification],
            &filter.without_decision_dates(),
            pagination,
            ReceiptOrder::OldestUpload,
        )
        .await
    }

    async fn list_receipt_history(
        &self,
        filter: ReceiptFilter,
        pagination: Pagination,
    ) -> PgResult<ReceiptPage> {
        // An explicit status narrows the view; otherwise both outcomes show.
        let statuses: Vec<VerificationStatus> = match filter.status {
            Some(status) => vec![status],
            None => VerificationStatus::history_statuses().to_vec(),
        };

        load_receipt_page(
            self,
            &statuses,
            &filter,
            pagination,
            ReceiptOrder::NewestDecision,
        )
        .await
    }
}

enum ReceiptOrder {
    OldestUpload,
    NewestDecision,
}

/// Escapes LIKE wildcards and wraps the term for substring matching.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// The note stores payment metadata as JSON, so a method filter reduces to
/// a substring match on the serialized key/value pair.
fn method_pattern(method: PaymentMethod) -> String {
    format!("%\"paymentMethod\":\"{}\"%", method.as_str())
}

/// Case-insensitive substring match for service form numbers.
fn form_number_matches(form_number: &str, term: &str) -> bool {
    form_number.to_lowercase().contains(&term.to_lowercase())
}

async fn load_receipt_page(
    client: &PgClient,
    statuses: &[VerificationStatus],
    filter: &ReceiptFilter,
    pagination: Pagination,
    order: ReceiptOrder,
) -> PgResult<ReceiptPage> {
    let mut conn = client.get_connection().await?;

    use schema::{accounts, booking_documents, bookings};

    let mut query = booking_documents::table
        .inner_join(bookings::table.inner_join(accounts::table))
        .filter(booking_documents::document_type.eq(DocumentType::PaymentReceipt))
        .filter(booking_documents::verification_status.eq_any(statuses))
        .into_boxed();

    let mut count_query = booking_documents::table
        .inner_join(bookings::table.inner_join(accounts::table))
        .filter(booking_documents::document_type.eq(DocumentType::PaymentReceipt))
        .filter(booking_documents::verification_status.eq_any(statuses))
        .into_boxed();

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);

        // Form numbers live on the booking's service form documents, not on
        // the receipt row, so matching bookings are resolved up front. Only
        // each booking's newest form row counts; a number on a superseded
        // form no longer identifies the booking.
        let newest_forms: Vec<(Uuid, Option<String>)> = booking_documents::table
            .filter(booking_documents::document_type.eq_any(SERVICE_FORM_TYPES))
            .distinct_on(booking_documents::booking_id)
            .order((
                booking_documents::booking_id.asc(),
                booking_documents::created_at.desc(),
            ))
            .select((
                booking_documents::booking_id,
                booking_documents::form_number,
            ))
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        let form_matches: Vec<Uuid> = newest_forms
            .into_iter()
            .filter(|(_, number)| {
                number
                    .as_deref()
                    .is_some_and(|number| form_number_matches(number, search))
            })
            .map(|(booking_id, _)| booking_id)
            .collect();

        query = query.filter(
            accounts::email
                .ilike(pattern.clone())
                .or(accounts::first_name.ilike(pattern.clone()))
                .or(accounts::last_name.ilike(pattern.clone()))
                .or(bookings::reference_number.ilike(pattern.clone()))
                .or(bookings::id.eq_any(form_matches.clone())),
        );
        count_query = count_query.filter(
            accounts::email
                .ilike(pattern.clone())
                .or(accounts::first_name.ilike(pattern.clone()))
                .or(accounts::last_name.ilike(pattern.clone()))
                .or(bookings::reference_number.ilike(pattern))
                .or(bookings::id.eq_any(form_matches)),
        );
    }

    if let Some(method) = filter.payment_method {
        let pattern = method_pattern(method);
        query = query.filter(booking_documents::note.ilike(pattern.clone()));
        count_query = count_query.filter(booking_documents::note.ilike(pattern));
    }

    if let Some(from) = filter.verified_from {
        query = query.filter(booking_documents::verified_at.ge(from));
        count_query = count_query.filter(booking_documents::verified_at.ge(from));
    }
    if let Some(to) = filter.verified_to {
        query = query.filter(booking_documents::verified_at.le(to));
        count_query = count_query.filter(booking_documents::verified_at.le(to));
    }

    let total = count_query
        .count()
        .get_result(&mut conn)
        .await
        .map_err(PgError::from)?;

    query = match order {
        ReceiptOrder::OldestUpload => query.order(booking_documents::created_at.asc()),
        ReceiptOrder::NewestDecision => query
            .order(booking_documents::verified_at.desc())
            .then_order_by(booking_documents::created_at.desc()),
    };

    let rows: Vec<(BookingDocument, (Booking, Account))> = query
        .limit(pagination.limit)
        .offset(pagination.offset)
        .select((
            BookingDocument::as_select(),
            (Booking::as_select(), Account::as_select()),
        ))
        .load(&mut conn)
        .await
        .map_err(PgError::from)?;

    // Side lookups for the page: verifier names, service form numbers, and
    // attached files. Each is one query over the page's ids.
    let document_ids: Vec<Uuid> = rows.iter().map(|(doc, _)| doc.id).collect();
    let booking_ids: Vec<Uuid> = rows.iter().map(|(_, (booking, _))| booking.id).collect();
    let verifier_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(doc, _)| doc.verified_by)
        .collect();

    let mut verifiers: HashMap<Uuid, Account> = HashMap::new();
    if !verifier_ids.is_empty() {
        let loaded = accounts::table
            .filter(accounts::id.eq_any(&verifier_ids))
            .select(Account::as_select())
            .load::<Account>(&mut conn)
            .await
            .map_err(PgError::from)?;
        verifiers.extend(loaded.into_iter().map(|account| (account.id, account)));
    }

    let mut form_numbers: HashMap<Uuid, String> = HashMap::new();
    if !booking_ids.is_empty() {
        let service_forms: Vec<(Uuid, Option<String>)> = booking_documents::table
            .filter(booking_documents::booking_id.eq_any(&booking_ids))
            .filter(booking_documents::document_type.eq_any(SERVICE_FORM_TYPES))
            .filter(booking_documents::form_number.is_not_null())
            .order(booking_documents::created_at.desc())
            .select((
                booking_documents::booking_id,
                booking_documents::form_number,
            ))
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        for (booking_id, form_number) in service_forms {
            if let Some(form_number) = form_number {
                form_numbers.entry(booking_id).or_insert(form_number);
            }
        }
    }

    let mut files: HashMap<Uuid, Vec<FileBlob>> = HashMap::new();
    if !document_ids.is_empty() {
        use schema::file_blobs;

        let blobs = file_blobs::table
            .filter(file_blobs::document_id.eq_any(&document_ids))
            .order(file_blobs::created_at.desc())
            .select(FileBlob::as_select())
            .load::<FileBlob>(&mut conn)
            .await
            .map_err(PgError::from)?;

        for blob in blobs {
            files.entry(blob.document_id).or_default().push(blob);
        }
    }

    let records = rows
        .into_iter()
        .map(|(document, (booking, customer))| ReceiptRecord {
            verifier: document
                .verified_by
                .and_then(|id| verifiers.get(&id).cloned()),
            service_form_number: form_numbers.get(&booking.id).cloned(),
            files: files.remove(&document.id).unwrap_or_default(),
            document,
            booking,
            customer,
        })
        .collect();

    Ok(ReceiptPage { records, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("CLB-2025"), "%CLB-2025%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
    }

    #[test]
    fn pending_view_ignores_decision_dates() {
        let filter = ReceiptFilter {
            verified_from: Some(OffsetDateTime::now_utc()),
            verified_to: Some(OffsetDateTime::now_utc()),
            ..ReceiptFilter::default()
        }
        .without_decision_dates();

        assert!(filter.verified_from.is_none());
        assert!(filter.verified_to.is_none());
    }

    #[test]
    fn form_number_match_is_case_insensitive() {
        assert!(form_number_matches("CLB-2025-0042", "clb-2025"));
        assert!(form_number_matches("CLB-2025-0042", "0042"));
        assert!(!form_number_matches("CLB-2025-0042", "2026"));
    }

    #[test]
    fn method_pattern_matches_serialized_metadata() {
        let note = crate::types::PaymentMetadata {
            amount: Some("120.50".to_string()),
            payment_method: Some(PaymentMethod::VoteTransfer),
            payment_date: None,
            reference_number: None,
        }
        .encode_note();

        let pattern = method_pattern(PaymentMethod::VoteTransfer);
        let needle = pattern.trim_matches('%');
        assert!(note.contains(needle));

        let other = method_pattern(PaymentMethod::Eft);
        assert!(!note.contains(other.trim_matches('%')));
    }
}
