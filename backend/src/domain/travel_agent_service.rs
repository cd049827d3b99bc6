//! Travel agent domain service implementing the travel agent driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    TravelAgentCommand, TravelAgentFilter, TravelAgentQuery, TravelAgentRepository,
    TravelAgentRepositoryError,
};
use crate::domain::service_support::{not_found, storage_failure, today};
use crate::domain::{Error, TravelAgent, TravelAgentDraft, TravelAgentId};

const ENTITY: &str = "TravelAgent";

/// Travel agent service. The raw resource ids are stored as given.
#[derive(Clone)]
pub struct TravelAgentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TravelAgentService<R> {
    /// Create a new service over `repo`, judging booking dates with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_travel_agent_error(error: TravelAgentRepositoryError) -> Error {
    storage_failure(ENTITY, error.kind(), &error)
}

impl<R> TravelAgentService<R>
where
    R: TravelAgentRepository,
{
    async fn require(&self, id: TravelAgentId) -> Result<TravelAgent, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_travel_agent_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }
}

#[async_trait]
impl<R> TravelAgentQuery for TravelAgentService<R>
where
    R: TravelAgentRepository,
{
    async fn list(&self, filter: TravelAgentFilter) -> Result<Vec<TravelAgent>, Error> {
        let agents = match filter.customer_id {
            Some(customer_id) => self.repo.find_by_customer_id(customer_id).await,
            None => self.repo.find_all().await,
        };
        agents.map_err(map_travel_agent_error)
    }

    async fn get(&self, id: TravelAgentId) -> Result<TravelAgent, Error> {
        self.require(id).await
    }
}

#[async_trait]
impl<R> TravelAgentCommand for TravelAgentService<R>
where
    R: TravelAgentRepository,
{
    async fn create(&self, draft: TravelAgentDraft) -> Result<TravelAgent, Error> {
        let agent = draft.validate(today(self.clock.as_ref()))?;
        let created = self
            .repo
            .create(&agent)
            .await
            .map_err(map_travel_agent_error)?;
        info!(travel_agent_id = %created.id, "travel agent record created");
        Ok(created)
    }

    async fn update(
        &self,
        id: TravelAgentId,
        draft: TravelAgentDraft,
    ) -> Result<TravelAgent, Error> {
        self.require(id).await?;
        let agent = draft.validate(today(self.clock.as_ref()))?;
        self.repo
            .update(id, &agent)
            .await
            .map_err(map_travel_agent_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn delete(&self, id: TravelAgentId) -> Result<(), Error> {
        self.require(id).await?;
        match self.repo.delete(id).await.map_err(map_travel_agent_error)? {
            true => {
                info!(travel_agent_id = %id, "travel agent record deleted");
                Ok(())
            }
            false => Err(not_found(ENTITY, id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTravelAgentRepository;
    use crate::domain::service_support::test_clock::{date, fixture_clock};
    use rstest::rstest;

    fn record(id: i64, customer_id: i64) -> TravelAgent {
        TravelAgent {
            id: TravelAgentId::new(id),
            customer_id,
            hotel_id: 2,
            flight_id: 3,
            taxi_id: 4,
            booking_date: date(2024, 1, 1),
        }
    }

    fn service(repo: MockTravelAgentRepository) -> TravelAgentService<MockTravelAgentRepository> {
        TravelAgentService::new(Arc::new(repo), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_customer_uses_customer_lookup() {
        let mut repo = MockTravelAgentRepository::new();
        repo.expect_find_by_customer_id()
            .withf(|customer_id| *customer_id == 7)
            .return_once(|_| Ok(vec![record(1, 7)]));
        repo.expect_find_all().never();

        let found = service(repo)
            .list(TravelAgentFilter {
                customer_id: Some(7),
            })
            .await
            .expect("listed");
        assert_eq!(found, vec![record(1, 7)]);
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_raw_ids_without_lookups() {
        let mut repo = MockTravelAgentRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|agent| Ok(agent.with_id(TravelAgentId::new(5))));

        let created = service(repo)
            .create(TravelAgentDraft {
                customer_id: 999,
                hotel_id: 2,
                flight_id: 3,
                taxi_id: 4,
                booking_date: Some(date(2024, 1, 1)),
            })
            .await
            .expect("created");
        assert_eq!(created.customer_id, 999);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_booking_date_fails_validation() {
        let error = service(MockTravelAgentRepository::new())
            .create(TravelAgentDraft::default())
            .await
            .expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_missing_record_is_not_found() {
        let mut repo = MockTravelAgentRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));
        repo.expect_delete().never();

        let error = service(repo)
            .delete(TravelAgentId::new(3))
            .await
            .expect_err("missing");
        assert_eq!(error.message(), "No TravelAgent with the id 3 was found!");
    }
}
