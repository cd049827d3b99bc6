//! Driving port for travel agent mutations.

use async_trait::async_trait;

use crate::domain::{Error, TravelAgent, TravelAgentDraft, TravelAgentId};

/// Domain use-case port for writing travel agent records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelAgentCommand: Send + Sync {
    /// Validate and persist a new record.
    async fn create(&self, draft: TravelAgentDraft) -> Result<TravelAgent, Error>;

    /// Validate and replace an existing record.
    async fn update(&self, id: TravelAgentId, draft: TravelAgentDraft)
    -> Result<TravelAgent, Error>;

    /// Remove an existing record.
    async fn delete(&self, id: TravelAgentId) -> Result<(), Error>;
}
