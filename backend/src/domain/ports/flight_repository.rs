//! Port for flight persistence.

use async_trait::async_trait;

use crate::domain::{Flight, FlightId, NewFlight};

use super::define_port_error;

define_port_error! {
    /// Errors raised by flight repository adapters.
    pub enum FlightRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "flight repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "flight repository query failed: {message}",
        /// The store's unique flight number constraint rejected the write.
        DuplicateFlightNumber { flight_number: String } =>
            "flight number already in use: {flight_number}",
    }
}

/// Port for flight storage and retrieval.
///
/// Returned flights carry the identities of their bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Every flight ordered by flight number.
    async fn find_all(&self) -> Result<Vec<Flight>, FlightRepositoryError>;

    /// Fetch one flight, `None` when absent.
    async fn find_by_id(&self, id: FlightId) -> Result<Option<Flight>, FlightRepositoryError>;

    /// Fetch the flight with `flight_number`, if any.
    async fn find_by_flight_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, FlightRepositoryError>;

    /// Persist a new flight and return it with its assigned identity.
    async fn create(&self, flight: &NewFlight) -> Result<Flight, FlightRepositoryError>;

    /// Replace the fields of an existing flight, `None` when `id` is absent.
    async fn update(
        &self,
        id: FlightId,
        flight: &NewFlight,
    ) -> Result<Option<Flight>, FlightRepositoryError>;

    /// Remove a flight and its bookings. Returns whether a row was removed.
    async fn delete(&self, id: FlightId) -> Result<bool, FlightRepositoryError>;
}
