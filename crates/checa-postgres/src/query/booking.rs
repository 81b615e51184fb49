//! Bookings repository for ownership and reference lookups.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::Booking;
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for booking database operations.
pub trait BookingRepository {
    /// Finds a booking by its unique identifier.
    fn find_booking_by_id(
        &self,
        booking_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Booking>>> + Send;

    /// Finds a booking by its human-readable reference number.
    fn find_booking_by_reference(
        &self,
        reference_number: &str,
    ) -> impl Future<Output = PgResult<Option<Booking>>> + Send;

    /// Lists all bookings owned by an account, newest first.
    fn list_account_bookings(
        &self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Booking>>> + Send;
}

impl BookingRepository for PgClient {
    async fn find_booking_by_id(&self, booking_id: Uuid) -> PgResult<Option<Booking>> {
        let mut conn = self.get_connection().await?;

        use schema::bookings::{self, dsl};

        let booking = bookings::table
            .filter(dsl::id.eq(booking_id))
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(booking)
    }

    async fn find_booking_by_reference(
        &self,
        reference_number: &str,
    ) -> PgResult<Option<Booking>> {
        let mut conn = self.get_connection().await?;

        use schema::bookings::{self, dsl};

        let booking = bookings::table
            .filter(dsl::reference_number.eq(reference_number))
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(booking)
    }

    async fn list_account_bookings(
        &self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Booking>> {
        let mut conn = self.get_connection().await?;

        use schema::bookings::{self, dsl};

        let bookings = bookings::table
            .filter(dsl::account_id.eq(account_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Booking::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(bookings)
    }
}
