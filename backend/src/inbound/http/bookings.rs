//! Booking HTTP handlers.
//!
//! Requests reference their customer and flight by id; responses embed both
//! records in full.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::BookingFilter;
use crate::domain::{Booking, BookingDraft, BookingId, CustomerId, FlightId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::customers::CustomerResponse;
use crate::inbound::http::flights::FlightResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Resource, reconcile_body_id};

/// Reference to a stored record by id.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
pub struct EntityRef {
    #[schema(example = 1)]
    pub id: Option<i64>,
}

/// Booking payload accepted by create and replace.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Required on replace; ignored on create.
    pub id: Option<i64>,
    pub customer: Option<EntityRef>,
    pub flight: Option<EntityRef>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-01")]
    pub booking_date: Option<NaiveDate>,
}

fn ref_id(reference: Option<EntityRef>) -> Option<i64> {
    reference.and_then(|r| r.id)
}

impl From<BookingRequest> for BookingDraft {
    fn from(value: BookingRequest) -> Self {
        Self {
            customer_id: ref_id(value.customer).map(CustomerId::new),
            flight_id: ref_id(value.flight).map(FlightId::new),
            booking_date: value.booking_date,
        }
    }
}

/// Stored booking with its customer and flight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub customer: CustomerResponse,
    pub flight: FlightResponse,
    #[schema(value_type = String, format = Date)]
    pub booking_date: NaiveDate,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id.get(),
            customer: value.customer.into(),
            flight: value.flight.into(),
            booking_date: value.booking_date,
        }
    }
}

/// Filters on the booking customer's names.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// Customer's exact first name.
    pub firstname: Option<String>,
    /// Customer's exact last name.
    pub lastname: Option<String>,
}

/// List bookings ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let BookingListQuery {
        firstname,
        lastname,
    } = query.into_inner();
    let bookings = state
        .bookings_query
        .list(BookingFilter {
            first_name: firstname,
            last_name: lastname,
        })
        .await?;
    Ok(web::Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// Fetch a booking by id.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 404, description = "No such booking", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id:\\d+}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state
        .bookings_query
        .get(BookingId::new(path.into_inner()))
        .await?;
    Ok(web::Json(booking.into()))
}

/// Book an existing customer onto an existing flight.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid booking", body = ErrorSchema),
        (status = 404, description = "Customer or flight missing", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let booking = state.bookings.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(booking)))
}

/// Replace a booking. Both references must still resolve.
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking replaced", body = BookingResponse),
        (status = 400, description = "Invalid booking", body = ErrorSchema),
        (status = 404, description = "Booking, customer or flight missing", body = ErrorSchema),
        (status = 409, description = "Id mismatch", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "updateBooking"
)]
#[put("/bookings/{id:\\d+}")]
pub async fn update_booking(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<BookingRequest>,
) -> ApiResult<web::Json<BookingResponse>> {
    let payload = payload.into_inner();
    let id = BookingId::new(reconcile_body_id(
        Resource::BOOKING,
        path.into_inner(),
        payload.id,
    )?);
    state.bookings_query.get(id).await?;
    let booking = state.bookings.update(id, payload.into()).await?;
    Ok(web::Json(booking.into()))
}

/// Delete a booking.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "No such booking", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "deleteBooking"
)]
#[delete("/bookings/{id:\\d+}")]
pub async fn delete_booking(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .bookings
        .delete(BookingId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
