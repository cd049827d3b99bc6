//! Flight domain service implementing the flight driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    FlightCommand, FlightFilter, FlightQuery, FlightRepository, FlightRepositoryError,
};
use crate::domain::service_support::{duplicate_flight_number, not_found, storage_failure};
use crate::domain::{Error, Flight, FlightDraft, FlightId};

const ENTITY: &str = "Flight";

/// Flight service: validation and flight number uniqueness in front of the repository.
#[derive(Clone)]
pub struct FlightService<R> {
    repo: Arc<R>,
}

impl<R> FlightService<R> {
    /// Create a new service over `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn map_flight_error(error: FlightRepositoryError) -> Error {
    match error {
        FlightRepositoryError::DuplicateFlightNumber { .. } => duplicate_flight_number(),
        other => storage_failure(ENTITY, other.kind(), &other),
    }
}

impl<R> FlightService<R>
where
    R: FlightRepository,
{
    async fn require(&self, id: FlightId) -> Result<Flight, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_flight_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn ensure_number_free(&self, number: &str, owner: Option<FlightId>) -> Result<(), Error> {
        match self
            .repo
            .find_by_flight_number(number)
            .await
            .map_err(map_flight_error)?
        {
            Some(flight) if Some(flight.id) != owner => Err(duplicate_flight_number()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> FlightQuery for FlightService<R>
where
    R: FlightRepository,
{
    async fn list(&self, filter: FlightFilter) -> Result<Vec<Flight>, Error> {
        match filter.flight_number {
            Some(number) => self
                .repo
                .find_by_flight_number(&number)
                .await
                .map(|found| found.into_iter().collect())
                .map_err(map_flight_error),
            None => self.repo.find_all().await.map_err(map_flight_error),
        }
    }

    async fn get(&self, id: FlightId) -> Result<Flight, Error> {
        self.require(id).await
    }
}

#[async_trait]
impl<R> FlightCommand for FlightService<R>
where
    R: FlightRepository,
{
    async fn create(&self, draft: FlightDraft) -> Result<Flight, Error> {
        let flight = draft.validate()?;
        self.ensure_number_free(&flight.flight_number, None).await?;

        let created = self.repo.create(&flight).await.map_err(map_flight_error)?;
        info!(flight_id = %created.id, flight_number = %created.flight_number, "flight created");
        Ok(created)
    }

    async fn update(&self, id: FlightId, draft: FlightDraft) -> Result<Flight, Error> {
        self.require(id).await?;
        let flight = draft.validate()?;
        self.ensure_number_free(&flight.flight_number, Some(id)).await?;

        let updated = self
            .repo
            .update(id, &flight)
            .await
            .map_err(map_flight_error)?
            .ok_or_else(|| not_found(ENTITY, id))?;
        info!(flight_id = %id, "flight updated");
        Ok(updated)
    }

    async fn delete(&self, id: FlightId) -> Result<(), Error> {
        self.require(id).await?;
        if !self.repo.delete(id).await.map_err(map_flight_error)? {
            return Err(not_found(ENTITY, id));
        }
        info!(flight_id = %id, "flight deleted");
        Ok(())
    }
}
