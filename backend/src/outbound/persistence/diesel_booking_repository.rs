//! PostgreSQL-backed `BookingRepository`.
//!
//! Reads join customers and flights so every booking is returned whole.
//! Writes store only the foreign keys and then reload the joined row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, NewBooking};

use super::diesel_helpers::{
    BOOKING_CUSTOMER_CONSTRAINT, BOOKING_FLIGHT_CONSTRAINT, BookingLookup, StoreFailure,
    classify, load_bookings,
};
use super::models::BookingRecord;
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Serve bookings from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    BookingRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => BookingRepositoryError::connection(message),
        other => BookingRepositoryError::query(other.into_message()),
    }
}

/// Writes translate foreign key failures into the missing reference.
fn map_write_error(error: diesel::result::Error, booking: &NewBooking) -> BookingRepositoryError {
    match classify(error) {
        StoreFailure::ForeignKeyViolation {
            constraint: Some(name),
        } if name == BOOKING_FLIGHT_CONSTRAINT => {
            BookingRepositoryError::missing_flight(booking.flight_id.get())
        }
        failure @ StoreFailure::ForeignKeyViolation { .. }
            if failure.names(BOOKING_CUSTOMER_CONSTRAINT) =>
        {
            BookingRepositoryError::missing_customer(booking.customer_id.get())
        }
        StoreFailure::Connection(message) => BookingRepositoryError::connection(message),
        other => BookingRepositoryError::query(other.into_message()),
    }
}

async fn find_one(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<Booking>, BookingRepositoryError> {
    let found = load_bookings(conn, BookingLookup::Id(id))
        .await
        .map_err(map_diesel_error)?;
    Ok(found.into_iter().next())
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn find_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_bookings(&mut conn, BookingLookup::All)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_one(&mut conn, id.get()).await
    }

    async fn find_by_customer_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_bookings(&mut conn, BookingLookup::CustomerFirstName(first_name))
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_customer_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_bookings(&mut conn, BookingLookup::CustomerLastName(last_name))
            .await
            .map_err(map_diesel_error)
    }

    async fn create(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i64 = diesel::insert_into(bookings::table)
            .values(BookingRecord::from(booking))
            .returning(bookings::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, booking))?;
        find_one(&mut conn, id)
            .await?
            .ok_or_else(|| {
                BookingRepositoryError::query(format!("booking {id} vanished after insert"))
            })
    }

    async fn update(
        &self,
        id: BookingId,
        booking: &NewBooking,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<i64> = diesel::update(bookings::table.find(id.get()))
            .set(BookingRecord::from(booking))
            .returning(bookings::id)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, booking))?;
        match updated {
            Some(id) => find_one(&mut conn, id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(bookings::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
