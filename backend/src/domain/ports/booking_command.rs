//! Driving port for booking mutations.

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, BookingId, Error};

/// Domain use-case port for writing bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate and persist a booking for an existing customer and flight.
    async fn create(&self, draft: BookingDraft) -> Result<Booking, Error>;

    /// Validate and replace an existing booking.
    async fn update(&self, id: BookingId, draft: BookingDraft) -> Result<Booking, Error>;

    /// Remove an existing booking.
    async fn delete(&self, id: BookingId) -> Result<(), Error>;
}
