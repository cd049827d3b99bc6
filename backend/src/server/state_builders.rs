//! Builders selecting the repository adapters behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use travel_backend::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
use travel_backend::outbound::memory::InMemoryStore;
use travel_backend::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselCustomerRepository, DieselFlightRepository,
    DieselGuestBookingRepository, DieselTravelAgentRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpStatePorts {
    Repositories {
        customers: Arc::new(DieselCustomerRepository::new(pool.clone())),
        flights: Arc::new(DieselFlightRepository::new(pool.clone())),
        bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
        travel_agents: Arc::new(DieselTravelAgentRepository::new(pool.clone())),
        guest_bookings: Arc::new(DieselGuestBookingRepository::new(pool.clone())),
    }
    .into_ports(clock)
}

fn memory_ports(clock: Arc<dyn Clock>) -> HttpStatePorts {
    Repositories::shared(Arc::new(InMemoryStore::default())).into_ports(clock)
}

/// Build the HTTP state once; every worker shares it.
///
/// Without a pool the in-memory adapter is used, so data does not survive
/// a restart.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    build_http_state_with_clock(config, Arc::new(DefaultClock))
}

fn build_http_state_with_clock(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving repositories from PostgreSQL");
            diesel_ports(pool, clock)
        }
        None => {
            warn!("no database configured; data is kept in memory only");
            memory_ports(clock)
        }
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use travel_backend::domain::CustomerDraft;
    use travel_backend::domain::ports::CustomerFilter;

    #[rstest]
    #[tokio::test]
    async fn without_pool_state_is_backed_by_memory() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let state = build_http_state(&config);

        let created = state
            .customers
            .create(CustomerDraft {
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                email: "jane@mailinator.com".to_owned(),
                phone_number: "(212) 555-1234".to_owned(),
                birth_date: NaiveDate::from_ymd_opt(1985, 10, 10),
            })
            .await
            .expect("customer stored in memory");

        let listed = state
            .customers_query
            .list(CustomerFilter::default())
            .await
            .expect("list customers");
        assert_eq!(listed, vec![created]);
    }
}
