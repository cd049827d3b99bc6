//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`;
//! each pulls this module in with `mod support;` and uses what it needs.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod database;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use travel_backend::Trace;
use travel_backend::inbound::http::api_services;
use travel_backend::inbound::http::health::{HealthState, live, ready};
use travel_backend::inbound::http::state::{HttpState, Repositories};
use travel_backend::outbound::memory::InMemoryStore;

/// Application wired like the server, over a fresh in-memory store.
pub fn memory_app(
    store: Arc<InMemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let ports = Repositories::shared(store).into_ports(Arc::new(DefaultClock));
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(Trace)
        .configure(api_services)
        .service(ready)
        .service(live)
}

/// A customer payload that passes validation.
pub fn customer_json(first_name: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Doe",
        "email": email,
        "phoneNumber": "(212) 555-1234",
        "birthDate": "1985-10-10"
    })
}

/// A flight payload that passes validation.
pub fn flight_json(number: &str) -> Value {
    json!({ "flightNumber": number, "departure": "LHR", "destination": "JFK" })
}

/// A booking date safely in the past.
pub const PAST_DATE: &str = "2020-01-15";
