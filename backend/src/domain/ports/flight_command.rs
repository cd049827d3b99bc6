//! Driving port for flight mutations.

use async_trait::async_trait;

use crate::domain::{Error, Flight, FlightDraft, FlightId};

/// Domain use-case port for writing flights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlightCommand: Send + Sync {
    /// Validate and persist a new flight with a unique flight number.
    async fn create(&self, draft: FlightDraft) -> Result<Flight, Error>;

    /// Validate and replace an existing flight.
    async fn update(&self, id: FlightId, draft: FlightDraft) -> Result<Flight, Error>;

    /// Remove an existing flight.
    async fn delete(&self, id: FlightId) -> Result<(), Error>;
}
