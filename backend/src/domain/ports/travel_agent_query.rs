//! Driving port for travel agent reads.

use async_trait::async_trait;

use crate::domain::{Error, TravelAgent, TravelAgentId};

/// Optional filter on the raw customer id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TravelAgentFilter {
    pub customer_id: Option<i64>,
}

/// Domain use-case port for reading travel agent records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelAgentQuery: Send + Sync {
    /// List records, narrowed by `filter`.
    async fn list(&self, filter: TravelAgentFilter) -> Result<Vec<TravelAgent>, Error>;

    /// Fetch one record or fail with `NotFound`.
    async fn get(&self, id: TravelAgentId) -> Result<TravelAgent, Error>;
}
