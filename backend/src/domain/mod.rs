//! Domain entities, validation rules and the services behind the REST API.
//!
//! Purpose: hold the travel booking model independent of HTTP and storage.
//! Entities come in three shapes: a `*Draft` as received from a client, a
//! validated `New*` ready to persist, and the stored entity with its id.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - Customer, Flight, Booking, TravelAgent: persisted entities.
//! - GuestBookingDraft: a customer plus their first booking.
//! - `*Service`: implementations of the driving ports in [`ports`].

pub mod booking;
pub mod customer;
pub mod error;
pub mod flight;
pub mod guest_booking;
pub mod ids;
pub mod ports;
pub mod trace_id;
pub mod travel_agent;
pub mod validation;

mod booking_service;
mod customer_service;
mod flight_service;
mod guest_booking_service;
pub(crate) mod service_support;
mod travel_agent_service;

pub use self::booking::{BOOKING_DATE_MESSAGE, Booking, BookingDraft, NewBooking};
pub use self::booking_service::BookingService;
pub use self::customer::{BIRTH_DATE_MESSAGE, Customer, CustomerDraft, NewCustomer};
pub use self::customer_service::CustomerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::flight::{Flight, FlightDraft, NewFlight};
pub use self::flight_service::FlightService;
pub use self::guest_booking::{
    GuestBookingDraft, GuestBookingLeg, GuestBookingState, NewGuestBooking,
};
pub use self::guest_booking_service::GuestBookingService;
pub use self::ids::{BookingId, CustomerId, FlightId, TravelAgentId};
pub use self::service_support::{DUPLICATE_EMAIL_MESSAGE, DUPLICATE_FLIGHT_NUMBER_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::travel_agent::{NewTravelAgent, TravelAgent, TravelAgentDraft};
pub use self::travel_agent_service::TravelAgentService;
pub use self::validation::{
    ConstraintViolation, EMAIL_FORMAT_MESSAGE, NAME_PATTERN_MESSAGE, PHONE_FORMAT_MESSAGE,
    ValidationFailed,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use travel_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("No Customer with the id 1 was found!"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
