//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Error};

/// Optional filters on the booking customer's names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Domain use-case port for reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// List bookings, narrowed by `filter`.
    async fn list(&self, filter: BookingFilter) -> Result<Vec<Booking>, Error>;

    /// Fetch one booking or fail with `NotFound`.
    async fn get(&self, id: BookingId) -> Result<Booking, Error>;
}
