//! Guest booking HTTP handler.
//!
//! One request creates a customer and their first booking. Either both are
//! stored or neither is.

use actix_web::{HttpResponse, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FlightId, GuestBookingDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bookings::{BookingResponse, EntityRef};
use crate::inbound::http::customers::CustomerRequest;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Booking half of a guest booking.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestBookingLegRequest {
    /// Placeholder; the new customer is used instead.
    #[schema(value_type = Option<Object>)]
    pub customer: Option<serde_json::Value>,
    pub flight: Option<EntityRef>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-01")]
    pub booking_date: Option<NaiveDate>,
}

/// A new customer and the booking to make for them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct GuestBookingRequest {
    pub customer: Option<CustomerRequest>,
    pub booking: Option<GuestBookingLegRequest>,
}

impl From<GuestBookingRequest> for GuestBookingDraft {
    fn from(value: GuestBookingRequest) -> Self {
        let booking = value.booking.unwrap_or_default();
        Self {
            customer: value.customer.unwrap_or_default().into(),
            flight_id: booking.flight.and_then(|f| f.id).map(FlightId::new),
            booking_date: booking.booking_date,
        }
    }
}

/// Create a customer and book them onto a flight in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/guestBooking",
    request_body = GuestBookingRequest,
    responses(
        (status = 201, description = "Customer and booking created", body = BookingResponse),
        (status = 400, description = "Invalid customer or booking", body = ErrorSchema),
        (status = 404, description = "No such flight", body = ErrorSchema),
        (status = 409, description = "Email already used", body = ErrorSchema)
    ),
    tags = ["guest bookings"],
    operation_id = "createGuestBooking"
)]
#[post("/guestBooking")]
pub async fn create_guest_booking(
    state: web::Data<HttpState>,
    payload: web::Json<GuestBookingRequest>,
) -> ApiResult<HttpResponse> {
    let booking = state
        .guest_bookings
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(booking)))
}
