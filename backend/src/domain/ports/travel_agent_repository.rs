//! Port for travel agent persistence.

use async_trait::async_trait;

use crate::domain::{NewTravelAgent, TravelAgent, TravelAgentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by travel agent repository adapters.
    pub enum TravelAgentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "travel agent repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "travel agent repository query failed: {message}",
    }
}

/// Port for travel agent storage and retrieval, listed in identity order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelAgentRepository: Send + Sync {
    /// Every record ordered by identity.
    async fn find_all(&self) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError>;

    /// Fetch one record, `None` when absent.
    async fn find_by_id(
        &self,
        id: TravelAgentId,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError>;

    /// Records carrying the raw `customer_id`.
    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError>;

    /// Persist a new record and return it with its assigned identity.
    async fn create(
        &self,
        agent: &NewTravelAgent,
    ) -> Result<TravelAgent, TravelAgentRepositoryError>;

    /// Replace the fields of an existing record, `None` when `id` is absent.
    async fn update(
        &self,
        id: TravelAgentId,
        agent: &NewTravelAgent,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError>;

    /// Remove a record. Returns whether a row was removed.
    async fn delete(&self, id: TravelAgentId) -> Result<bool, TravelAgentRepositoryError>;
}
