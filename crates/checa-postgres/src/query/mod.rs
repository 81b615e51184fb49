//! Database query repositories for all entities in the system.
//!
//! Each repository is a trait implemented on [`crate::PgClient`], providing
//! high-level, type-safe database operations for one entity.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`]
//! struct to provide consistent, bounded pagination across the system.

pub mod account;
pub mod audit_event;
pub mod booking;
pub mod booking_document;
pub mod payment_receipt;
pub mod signature_settings;

pub use account::AccountRepository;
pub use audit_event::AuditEventRepository;
pub use booking::BookingRepository;
pub use booking_document::{BookingDocumentRepository, DocumentTransition, LatestDocuments};
pub use payment_receipt::{
    PaymentReceiptRepository, ReceiptFilter, ReceiptPage, ReceiptRecord,
};
use serde::{Deserialize, Serialize};
pub use signature_settings::SignatureSettingsRepository;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 100
            limit: limit.clamp(1, 100),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);
        Self::new(page_size, (page - 1) * page_size)
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }

    /// Gets the page size.
    pub fn page_size(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(20, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 40);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 40);
    }

    #[test]
    fn pagination_bounds_checking() {
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.limit, 1);

        let pagination = Pagination::new(500, 10);
        assert_eq!(pagination.limit, 100);

        let pagination = Pagination::new(10, -5);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_from_page() {
        let pagination = Pagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::from_page(3, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);

        let pagination = Pagination::from_page(0, 20);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_page_number() {
        let pagination = Pagination::new(20, 0);
        assert_eq!(pagination.page_number(), 1);

        let pagination = Pagination::new(10, 25);
        assert_eq!(pagination.page_number(), 3);
    }
}
