//! PostgreSQL-backed `GuestBookingRepository`.
//!
//! The customer insert, the booking insert and the reload of the joined
//! booking all run inside one transaction. Any error rolls back both rows.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{GuestBookingRepository, GuestBookingRepositoryError};
use crate::domain::{Booking, NewGuestBooking};

use super::diesel_helpers::{
    BOOKING_FLIGHT_CONSTRAINT, BookingLookup, CUSTOMER_EMAIL_CONSTRAINT, StoreFailure, classify,
    load_bookings,
};
use super::models::{BookingRecord, CustomerRecord};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, customers};

/// Diesel implementation of the guest booking port.
#[derive(Clone)]
pub struct DieselGuestBookingRepository {
    pool: DbPool,
}

impl DieselGuestBookingRepository {
    /// Write guest bookings through `pool`, one transaction each.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the transaction body.
///
/// `Rejected` carries an already classified failure of one statement;
/// `Diesel` covers begin, commit and rollback.
#[derive(Debug)]
enum TransactionError {
    Diesel(diesel::result::Error),
    Rejected(GuestBookingRepositoryError),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> GuestBookingRepositoryError {
    GuestBookingRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> GuestBookingRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => GuestBookingRepositoryError::connection(message),
        other => GuestBookingRepositoryError::query(other.into_message()),
    }
}

fn map_customer_insert_error(
    error: diesel::result::Error,
    email: &str,
) -> GuestBookingRepositoryError {
    match classify(error) {
        failure @ StoreFailure::UniqueViolation { .. }
            if failure.names(CUSTOMER_EMAIL_CONSTRAINT) =>
        {
            GuestBookingRepositoryError::duplicate_email(email)
        }
        StoreFailure::Connection(message) => GuestBookingRepositoryError::connection(message),
        other => GuestBookingRepositoryError::query(other.into_message()),
    }
}

fn map_booking_insert_error(
    error: diesel::result::Error,
    flight_id: i64,
) -> GuestBookingRepositoryError {
    match classify(error) {
        failure @ StoreFailure::ForeignKeyViolation { .. }
            if failure.names(BOOKING_FLIGHT_CONSTRAINT) =>
        {
            GuestBookingRepositoryError::missing_flight(flight_id)
        }
        StoreFailure::Connection(message) => GuestBookingRepositoryError::connection(message),
        other => GuestBookingRepositoryError::query(other.into_message()),
    }
}

#[async_trait]
impl GuestBookingRepository for DieselGuestBookingRepository {
    async fn create(
        &self,
        guest_booking: &NewGuestBooking,
    ) -> Result<Booking, GuestBookingRepositoryError> {
        let NewGuestBooking { customer, leg } = guest_booking;
        let flight_id = leg.flight_id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction::<Booking, TransactionError, _>(|conn| {
                async move {
                    let customer_id: i64 = diesel::insert_into(customers::table)
                        .values(CustomerRecord::from(customer))
                        .returning(customers::id)
                        .get_result(conn)
                        .await
                        .map_err(|err| {
                            TransactionError::Rejected(map_customer_insert_error(
                                err,
                                &customer.email,
                            ))
                        })?;

                    let booking_id: i64 = diesel::insert_into(bookings::table)
                        .values(BookingRecord {
                            customer_id,
                            flight_id,
                            booking_date: leg.booking_date,
                        })
                        .returning(bookings::id)
                        .get_result(conn)
                        .await
                        .map_err(|err| {
                            TransactionError::Rejected(map_booking_insert_error(err, flight_id))
                        })?;
                    debug!(customer_id, booking_id, "guest booking rows inserted");

                    load_bookings(conn, BookingLookup::Id(booking_id))
                        .await?
                        .into_iter()
                        .next()
                        .ok_or_else(|| {
                            TransactionError::Rejected(GuestBookingRepositoryError::query(
                                format!("booking {booking_id} not visible inside its transaction"),
                            ))
                        })
                }
                .scope_boxed()
            })
            .await;

        outcome.map_err(|error| match error {
            TransactionError::Diesel(error) => map_diesel_error(error),
            TransactionError::Rejected(error) => error,
        })
    }
}
