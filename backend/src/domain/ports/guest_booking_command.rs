//! Driving port for guest bookings.

use async_trait::async_trait;

use crate::domain::{Booking, Error, GuestBookingDraft};

/// Domain use-case port creating a customer and their booking together.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestBookingCommand: Send + Sync {
    /// Validate both halves, then write them atomically.
    ///
    /// On any failure neither the customer nor the booking is persisted and
    /// the error is returned unchanged.
    async fn create(&self, draft: GuestBookingDraft) -> Result<Booking, Error>;
}
