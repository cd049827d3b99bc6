//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod customers;
pub mod error;
pub mod flights;
pub mod guest_bookings;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod travel_agents;
pub(crate) mod validation;

pub use error::ApiResult;

use actix_web::web;

use self::error::{json_error_handler, path_error_handler, query_error_handler};

/// Mount every REST resource under `/api/v1`.
///
/// Extractor failures are routed through the error mapping so malformed
/// bodies, query strings and out-of-range path ids answer with the standard
/// error payload.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api/v1")
                .service(customers::list_customers)
                .service(customers::get_customer)
                .service(customers::get_customer_by_email)
                .service(customers::create_customer)
                .service(customers::update_customer)
                .service(customers::delete_customer)
                .service(flights::list_flights)
                .service(flights::get_flight)
                .service(flights::create_flight)
                .service(flights::update_flight)
                .service(flights::delete_flight)
                .service(bookings::list_bookings)
                .service(bookings::get_booking)
                .service(bookings::create_booking)
                .service(bookings::update_booking)
                .service(bookings::delete_booking)
                .service(travel_agents::list_travel_agents)
                .service(travel_agents::get_travel_agent)
                .service(travel_agents::create_travel_agent)
                .service(travel_agents::update_travel_agent)
                .service(travel_agents::delete_travel_agent)
                .service(guest_bookings::create_guest_booking),
        );
}
