//! PostgreSQL-backed `TravelAgentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TravelAgentRepository, TravelAgentRepositoryError};
use crate::domain::{NewTravelAgent, TravelAgent, TravelAgentId};

use super::diesel_helpers::{StoreFailure, classify};
use super::models::{TravelAgentRecord, TravelAgentRow};
use super::pool::{DbPool, PoolError};
use super::schema::travel_agents;

/// Diesel implementation of the travel agent repository port.
#[derive(Clone)]
pub struct DieselTravelAgentRepository {
    pool: DbPool,
}

impl DieselTravelAgentRepository {
    /// Serve travel agent records from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TravelAgentRepositoryError {
    TravelAgentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> TravelAgentRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => TravelAgentRepositoryError::connection(message),
        other => TravelAgentRepositoryError::query(other.into_message()),
    }
}

#[async_trait]
impl TravelAgentRepository for DieselTravelAgentRepository {
    async fn find_all(&self) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TravelAgentRow> = travel_agents::table
            .select(TravelAgentRow::as_select())
            .order_by(travel_agents::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(TravelAgent::from).collect())
    }

    async fn find_by_id(
        &self,
        id: TravelAgentId,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TravelAgentRow> = travel_agents::table
            .find(id.get())
            .select(TravelAgentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(TravelAgent::from))
    }

    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TravelAgentRow> = travel_agents::table
            .filter(travel_agents::customer_id.eq(customer_id))
            .select(TravelAgentRow::as_select())
            .order_by(travel_agents::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(TravelAgent::from).collect())
    }

    async fn create(
        &self,
        agent: &NewTravelAgent,
    ) -> Result<TravelAgent, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: TravelAgentRow = diesel::insert_into(travel_agents::table)
            .values(TravelAgentRecord::from(agent))
            .returning(TravelAgentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: TravelAgentId,
        agent: &NewTravelAgent,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TravelAgentRow> = diesel::update(travel_agents::table.find(id.get()))
            .set(TravelAgentRecord::from(agent))
            .returning(TravelAgentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(TravelAgent::from))
    }

    async fn delete(&self, id: TravelAgentId) -> Result<bool, TravelAgentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(travel_agents::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
