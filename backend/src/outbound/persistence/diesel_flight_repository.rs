//! PostgreSQL-backed `FlightRepository`.
//!
//! Each returned flight carries the ids of the bookings referencing it,
//! loaded with one extra query per call.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FlightRepository, FlightRepositoryError};
use crate::domain::{Flight, FlightId, NewFlight};

use super::diesel_helpers::{FLIGHT_NUMBER_CONSTRAINT, StoreFailure, classify, load_flights};
use super::models::{FlightRecord, FlightRow};
use super::pool::{DbPool, PoolError};
use super::schema::flights;

/// Diesel implementation of the flight repository port.
#[derive(Clone)]
pub struct DieselFlightRepository {
    pool: DbPool,
}

impl DieselFlightRepository {
    /// Serve flights from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FlightRepositoryError {
    FlightRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FlightRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => FlightRepositoryError::connection(message),
        other => FlightRepositoryError::query(other.into_message()),
    }
}

fn map_write_error(error: diesel::result::Error, flight_number: &str) -> FlightRepositoryError {
    match classify(error) {
        failure @ StoreFailure::UniqueViolation { .. }
            if failure.names(FLIGHT_NUMBER_CONSTRAINT) =>
        {
            FlightRepositoryError::duplicate_flight_number(flight_number)
        }
        StoreFailure::Connection(message) => FlightRepositoryError::connection(message),
        other => FlightRepositoryError::query(other.into_message()),
    }
}

impl DieselFlightRepository {
    async fn find_one(
        &self,
        row: Option<FlightRow>,
        conn: &mut diesel_async::AsyncPgConnection,
    ) -> Result<Option<Flight>, FlightRepositoryError> {
        let flights = load_flights(conn, row.into_iter().collect())
            .await
            .map_err(map_diesel_error)?;
        Ok(flights.into_iter().next())
    }
}

#[async_trait]
impl FlightRepository for DieselFlightRepository {
    async fn find_all(&self) -> Result<Vec<Flight>, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FlightRow> = flights::table
            .select(FlightRow::as_select())
            .order_by((flights::flight_number.asc(), flights::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        load_flights(&mut conn, rows).await.map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: FlightId) -> Result<Option<Flight>, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<FlightRow> = flights::table
            .find(id.get())
            .select(FlightRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        self.find_one(row, &mut conn).await
    }

    async fn find_by_flight_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<FlightRow> = flights::table
            .filter(flights::flight_number.eq(flight_number))
            .select(FlightRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        self.find_one(row, &mut conn).await
    }

    async fn create(&self, flight: &NewFlight) -> Result<Flight, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: FlightRow = diesel::insert_into(flights::table)
            .values(FlightRecord::from(flight))
            .returning(FlightRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &flight.flight_number))?;
        Ok(row.into_flight(Vec::new()))
    }

    async fn update(
        &self,
        id: FlightId,
        flight: &NewFlight,
    ) -> Result<Option<Flight>, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<FlightRow> = diesel::update(flights::table.find(id.get()))
            .set(FlightRecord::from(flight))
            .returning(FlightRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, &flight.flight_number))?;
        self.find_one(row, &mut conn).await
    }

    async fn delete(&self, id: FlightId) -> Result<bool, FlightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(flights::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
