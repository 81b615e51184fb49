//! Booking model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::bookings;

/// Booking model representing a lab service booking.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    /// Unique booking identifier
    pub id: Uuid,
    /// Customer account that owns the booking
    pub account_id: Uuid,
    /// Human-readable booking reference, e.g. `CLB-2025-0042`
    pub reference_number: String,
    /// Whether the booking includes a workspace rental component
    pub has_workspace: bool,
    /// Timestamp when the booking was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the booking was last updated
    pub updated_at: OffsetDateTime,
}

impl Booking {
    /// Returns whether the given account owns this booking.
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.account_id == account_id
    }
}
