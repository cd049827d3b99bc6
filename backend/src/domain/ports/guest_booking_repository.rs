//! Port for the guest booking composite write.

use async_trait::async_trait;

use crate::domain::{Booking, NewGuestBooking};

use super::define_port_error;

define_port_error! {
    /// Errors raised while writing a guest booking.
    ///
    /// Any error means the transaction was rolled back and neither the
    /// customer nor the booking is visible.
    pub enum GuestBookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "guest booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "guest booking repository query failed: {message}",
        /// The customer's email was taken by a concurrent write.
        DuplicateEmail { email: String } =>
            "customer email already in use: {email}",
        /// The booked flight does not exist.
        MissingFlight { id: i64 } =>
            "guest booking references unknown flight {id}",
    }
}

/// Port writing a new customer and a booking that references it atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestBookingRepository: Send + Sync {
    /// Insert the customer, then the booking pointing at the new customer,
    /// in one transaction. Returns the stored booking.
    async fn create(
        &self,
        guest_booking: &NewGuestBooking,
    ) -> Result<Booking, GuestBookingRepositoryError>;
}
