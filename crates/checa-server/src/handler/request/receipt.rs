//! Query parameters for the finance receipt views.

use checa_postgres::query::{Pagination, ReceiptFilter};
use checa_postgres::types::{PaymentMethod, VerificationStatus};
use serde::Deserialize;
use time::{Date, Time};

/// Query parameters shared by the pending queue and the history view.
///
/// The status and date-range fields only affect the history view; the
/// pending queue is always `pending_verification` with no decision dates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptListQuery {
    /// Substring search over customer name, email, booking reference, and
    /// service form number. The finance UI sends this as `q`.
    #[serde(alias = "q")]
    pub search: Option<String>,
    /// Restrict to receipts declaring this payment method.
    pub method: Option<PaymentMethod>,
    /// Restrict the history view to one decision outcome.
    pub status: Option<VerificationStatus>,
    /// Earliest decision date, inclusive.
    pub date_from: Option<Date>,
    /// Latest decision date, inclusive.
    pub date_to: Option<Date>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Records per page.
    pub page_size: Option<i64>,
}

impl ReceiptListQuery {
    /// Converts the query into repository filters.
    pub fn filter(&self) -> ReceiptFilter {
        ReceiptFilter {
            search: self.search.clone(),
            payment_method: self.method,
            status: self.status,
            verified_from: self
                .date_from
                .map(|date| date.midnight().assume_utc()),
            verified_to: self
                .date_to
                .map(|date| date.with_time(Time::MAX).assume_utc()),
        }
    }

    /// Converts the query into bounded pagination.
    pub fn pagination(&self) -> Pagination {
        match (self.page, self.page_size) {
            (None, None) => Pagination::default(),
            (page, page_size) => Pagination::from_page(
                page.unwrap_or(1),
                page_size.unwrap_or_else(|| Pagination::default().limit),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let query = ReceiptListQuery::default();
        let pagination = query.pagination();
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, Pagination::default().limit);
    }

    #[test]
    fn page_and_size_translate_to_offset() {
        let query = ReceiptListQuery {
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        };
        let pagination = query.pagination();
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);
    }

    #[test]
    fn search_binds_the_q_parameter() {
        let uri: axum::http::Uri = "/payment-receipts/pending?q=alice".parse().unwrap();
        let axum::extract::Query(query) =
            axum::extract::Query::<ReceiptListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.search.as_deref(), Some("alice"));

        let uri: axum::http::Uri = "/payment-receipts/pending?search=bob".parse().unwrap();
        let axum::extract::Query(query) =
            axum::extract::Query::<ReceiptListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.search.as_deref(), Some("bob"));
    }

    #[test]
    fn date_range_covers_whole_days() {
        let date = Date::from_calendar_date(2025, time::Month::June, 2).unwrap();
        let query = ReceiptListQuery {
            date_from: Some(date),
            date_to: Some(date),
            ..Default::default()
        };

        let filter = query.filter();
        let from = filter.verified_from.unwrap();
        let to = filter.verified_to.unwrap();
        assert_eq!(from.date(), date);
        assert_eq!(to.date(), date);
        assert!(from < to);
    }
}
