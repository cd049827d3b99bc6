//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler under `/api/v1`, the health
//! probes, and the request/response payloads. The domain error type is
//! described through [`ErrorSchema`] so the domain stays free of utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::bookings::{BookingRequest, BookingResponse, EntityRef};
use crate::inbound::http::customers::{CustomerRequest, CustomerResponse};
use crate::inbound::http::flights::{FlightRequest, FlightResponse};
use crate::inbound::http::guest_bookings::{GuestBookingLegRequest, GuestBookingRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::travel_agents::{TravelAgentRequest, TravelAgentResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel booking API",
        description = "Customers, flights, bookings, guest bookings and travel agent records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::get_customer_by_email,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::flights::list_flights,
        crate::inbound::http::flights::get_flight,
        crate::inbound::http::flights::create_flight,
        crate::inbound::http::flights::update_flight,
        crate::inbound::http::flights::delete_flight,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::update_booking,
        crate::inbound::http::bookings::delete_booking,
        crate::inbound::http::travel_agents::list_travel_agents,
        crate::inbound::http::travel_agents::get_travel_agent,
        crate::inbound::http::travel_agents::create_travel_agent,
        crate::inbound::http::travel_agents::update_travel_agent,
        crate::inbound::http::travel_agents::delete_travel_agent,
        crate::inbound::http::guest_bookings::create_guest_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CustomerRequest,
        CustomerResponse,
        FlightRequest,
        FlightResponse,
        EntityRef,
        BookingRequest,
        BookingResponse,
        TravelAgentRequest,
        TravelAgentResponse,
        GuestBookingLegRequest,
        GuestBookingRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "customers", description = "Customer records"),
        (name = "flights", description = "Flights and their bookings"),
        (name = "bookings", description = "Bookings of customers onto flights"),
        (name = "guest bookings", description = "A new customer and their first booking"),
        (name = "travel agents", description = "Travel agent booking records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
