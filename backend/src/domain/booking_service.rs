//! Booking domain service implementing the booking driving ports.
//!
//! Bookings need a persisted customer and flight. Both are looked up before
//! the write so a dangling reference surfaces as `NotFound` rather than as a
//! storage error; the store's foreign keys remain the backstop.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::customer_service::map_customer_error;
use crate::domain::flight_service::map_flight_error;
use crate::domain::ports::{
    BookingCommand, BookingFilter, BookingQuery, BookingRepository, BookingRepositoryError,
    CustomerRepository, FlightRepository,
};
use crate::domain::service_support::{not_found, retain_common, storage_failure, today};
use crate::domain::{Booking, BookingDraft, BookingId, Error, NewBooking};

const ENTITY: &str = "Booking";

/// Booking service over booking, customer and flight repositories.
#[derive(Clone)]
pub struct BookingService<B, C, F> {
    bookings: Arc<B>,
    customers: Arc<C>,
    flights: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<B, C, F> BookingService<B, C, F> {
    /// Create a new service. `clock` decides which booking dates are past.
    pub fn new(
        bookings: Arc<B>,
        customers: Arc<C>,
        flights: Arc<F>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            customers,
            flights,
            clock,
        }
    }
}

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::MissingCustomer { id } => not_found("Customer", id),
        BookingRepositoryError::MissingFlight { id } => not_found("Flight", id),
        other => storage_failure(ENTITY, other.kind(), &other),
    }
}

impl<B, C, F> BookingService<B, C, F>
where
    B: BookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    async fn require(&self, id: BookingId) -> Result<Booking, Error> {
        self.bookings
            .find_by_id(id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn ensure_references(&self, booking: &NewBooking) -> Result<(), Error> {
        self.customers
            .find_by_id(booking.customer_id)
            .await
            .map_err(map_customer_error)?
            .ok_or_else(|| not_found("Customer", booking.customer_id))?;
        self.flights
            .find_by_id(booking.flight_id)
            .await
            .map_err(map_flight_error)?
            .ok_or_else(|| not_found("Flight", booking.flight_id))?;
        Ok(())
    }
}

#[async_trait]
impl<B, C, F> BookingQuery for BookingService<B, C, F>
where
    B: BookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    async fn list(&self, filter: BookingFilter) -> Result<Vec<Booking>, Error> {
        let BookingFilter {
            first_name,
            last_name,
        } = filter;
        let bookings = match (first_name, last_name) {
            (None, None) => self.bookings.find_all().await,
            (Some(first), None) => self.bookings.find_by_customer_first_name(&first).await,
            (None, Some(last)) => self.bookings.find_by_customer_last_name(&last).await,
            (Some(first), Some(last)) => {
                let by_first = self
                    .bookings
                    .find_by_customer_first_name(&first)
                    .await
                    .map_err(map_booking_error)?;
                let by_last = self
                    .bookings
                    .find_by_customer_last_name(&last)
                    .await
                    .map_err(map_booking_error)?;
                Ok(retain_common(by_first, &by_last, |b| b.id))
            }
        };
        bookings.map_err(map_booking_error)
    }

    async fn get(&self, id: BookingId) -> Result<Booking, Error> {
        self.require(id).await
    }
}

#[async_trait]
impl<B, C, F> BookingCommand for BookingService<B, C, F>
where
    B: BookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    async fn create(&self, draft: BookingDraft) -> Result<Booking, Error> {
        let booking = draft.validate(today(self.clock.as_ref()))?;
        self.ensure_references(&booking).await?;

        let created = self
            .bookings
            .create(&booking)
            .await
            .map_err(map_booking_error)?;
        info!(
            booking_id = %created.id,
            customer_id = %booking.customer_id,
            flight_id = %booking.flight_id,
            "booking created"
        );
        Ok(created)
    }

    async fn update(&self, id: BookingId, draft: BookingDraft) -> Result<Booking, Error> {
        self.require(id).await?;
        let booking = draft.validate(today(self.clock.as_ref()))?;
        self.ensure_references(&booking).await?;

        let updated = self
            .bookings
            .update(id, &booking)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| not_found(ENTITY, id))?;
        info!(booking_id = %id, "booking updated");
        Ok(updated)
    }

    async fn delete(&self, id: BookingId) -> Result<(), Error> {
        self.require(id).await?;
        if !self.bookings.delete(id).await.map_err(map_booking_error)? {
            return Err(not_found(ENTITY, id));
        }
        info!(booking_id = %id, "booking deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
