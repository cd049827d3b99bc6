//! Flight HTTP handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::FlightFilter;
use crate::domain::{Flight, FlightDraft, FlightId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Resource, reconcile_body_id};

/// Flight payload accepted by create and replace.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightRequest {
    /// Required on replace; ignored on create.
    pub id: Option<i64>,
    #[schema(example = "BA123")]
    pub flight_number: Option<String>,
    #[schema(example = "LHR")]
    pub departure: Option<String>,
    #[schema(example = "NCL")]
    pub destination: Option<String>,
}

impl From<FlightRequest> for FlightDraft {
    fn from(value: FlightRequest) -> Self {
        Self {
            flight_number: value.flight_number.unwrap_or_default(),
            departure: value.departure.unwrap_or_default(),
            destination: value.destination.unwrap_or_default(),
        }
    }
}

/// Stored flight with the ids of its bookings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightResponse {
    pub id: i64,
    pub flight_number: String,
    pub departure: String,
    pub destination: String,
    /// Read-only back-reference.
    pub bookings: Vec<i64>,
}

impl From<Flight> for FlightResponse {
    fn from(value: Flight) -> Self {
        Self {
            id: value.id.get(),
            flight_number: value.flight_number,
            departure: value.departure,
            destination: value.destination,
            bookings: value.booking_ids.into_iter().map(|id| id.get()).collect(),
        }
    }
}

/// Optional flight number filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FlightListQuery {
    /// Exact flight number.
    pub flight_number: Option<String>,
}

/// List flights ordered by flight number.
#[utoipa::path(
    get,
    path = "/api/v1/flights",
    params(FlightListQuery),
    responses(
        (status = 200, description = "Flights", body = [FlightResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["flights"],
    operation_id = "listFlights"
)]
#[get("/flights")]
pub async fn list_flights(
    state: web::Data<HttpState>,
    query: web::Query<FlightListQuery>,
) -> ApiResult<web::Json<Vec<FlightResponse>>> {
    let flights = state
        .flights_query
        .list(FlightFilter {
            flight_number: query.into_inner().flight_number,
        })
        .await?;
    Ok(web::Json(flights.into_iter().map(FlightResponse::from).collect()))
}

/// Fetch a flight by id.
#[utoipa::path(
    get,
    path = "/api/v1/flights/{id}",
    params(("id" = i64, Path, description = "Flight id")),
    responses(
        (status = 200, description = "Flight", body = FlightResponse),
        (status = 404, description = "No such flight", body = ErrorSchema)
    ),
    tags = ["flights"],
    operation_id = "getFlight"
)]
#[get("/flights/{id:\\d+}")]
pub async fn get_flight(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FlightResponse>> {
    let flight = state
        .flights_query
        .get(FlightId::new(path.into_inner()))
        .await?;
    Ok(web::Json(flight.into()))
}

/// Create a flight with a unique flight number.
#[utoipa::path(
    post,
    path = "/api/v1/flights",
    request_body = FlightRequest,
    responses(
        (status = 201, description = "Flight created", body = FlightResponse),
        (status = 400, description = "Invalid flight", body = ErrorSchema),
        (status = 409, description = "Flight number already used", body = ErrorSchema)
    ),
    tags = ["flights"],
    operation_id = "createFlight"
)]
#[post("/flights")]
pub async fn create_flight(
    state: web::Data<HttpState>,
    payload: web::Json<FlightRequest>,
) -> ApiResult<HttpResponse> {
    let flight = state.flights.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(FlightResponse::from(flight)))
}

/// Replace a flight.
#[utoipa::path(
    put,
    path = "/api/v1/flights/{id}",
    params(("id" = i64, Path, description = "Flight id")),
    request_body = FlightRequest,
    responses(
        (status = 200, description = "Flight replaced", body = FlightResponse),
        (status = 400, description = "Invalid flight", body = ErrorSchema),
        (status = 404, description = "No such flight", body = ErrorSchema),
        (status = 409, description = "Id mismatch or flight number already used", body = ErrorSchema)
    ),
    tags = ["flights"],
    operation_id = "updateFlight"
)]
#[put("/flights/{id:\\d+}")]
pub async fn update_flight(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<FlightRequest>,
) -> ApiResult<web::Json<FlightResponse>> {
    let payload = payload.into_inner();
    let id = FlightId::new(reconcile_body_id(
        Resource::FLIGHT,
        path.into_inner(),
        payload.id,
    )?);
    state.flights_query.get(id).await?;
    let flight = state.flights.update(id, payload.into()).await?;
    Ok(web::Json(flight.into()))
}

/// Delete a flight together with its bookings.
#[utoipa::path(
    delete,
    path = "/api/v1/flights/{id}",
    params(("id" = i64, Path, description = "Flight id")),
    responses(
        (status = 204, description = "Flight deleted"),
        (status = 404, description = "No such flight", body = ErrorSchema)
    ),
    tags = ["flights"],
    operation_id = "deleteFlight"
)]
#[delete("/flights/{id:\\d+}")]
pub async fn delete_flight(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .flights
        .delete(FlightId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
