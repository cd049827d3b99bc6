//! Driving port for flight reads.

use async_trait::async_trait;

use crate::domain::{Error, Flight, FlightId};

/// Optional exact-match filter for listing flights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub flight_number: Option<String>,
}

/// Domain use-case port for reading flights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlightQuery: Send + Sync {
    /// List flights, narrowed by `filter`.
    async fn list(&self, filter: FlightFilter) -> Result<Vec<Flight>, Error>;

    /// Fetch one flight or fail with `NotFound`.
    async fn get(&self, id: FlightId) -> Result<Flight, Error>;
}
