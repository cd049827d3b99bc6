//! Port for booking persistence.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, NewBooking};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking repository query failed: {message}",
        /// The referenced customer row does not exist.
        MissingCustomer { id: i64 } =>
            "booking references unknown customer {id}",
        /// The referenced flight row does not exist.
        MissingFlight { id: i64 } =>
            "booking references unknown flight {id}",
    }
}

/// Port for booking storage and retrieval.
///
/// Bookings are returned with their customer and flight resolved and are
/// listed in identity order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking ordered by identity.
    async fn find_all(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Fetch one booking, `None` when absent.
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Bookings whose customer's first name equals `first_name`.
    async fn find_by_customer_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Bookings whose customer's last name equals `last_name`.
    async fn find_by_customer_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Persist a new booking and return it resolved.
    async fn create(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError>;

    /// Replace the fields of an existing booking, `None` when `id` is absent.
    async fn update(
        &self,
        id: BookingId,
        booking: &NewBooking,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Remove a booking. Returns whether a row was removed.
    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError>;
}
