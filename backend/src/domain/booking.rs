//! Booking aggregate linking one customer to one flight.
//!
//! The booking date must lie strictly in the past. That reads like an
//! inverted rule for travel bookings but is kept as-is pending product
//! confirmation; the message text is likewise unchanged.

use chrono::NaiveDate;

use crate::domain::validation::{ValidationFailed, Validator, in_past};
use crate::domain::{BookingId, Customer, CustomerId, Flight, FlightId};

/// Message shown when a booking date is today or later.
pub const BOOKING_DATE_MESSAGE: &str =
    "Booking dates can not be in the past. Please choose one from the future";

/// Unvalidated booking fields as received from a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub customer_id: Option<CustomerId>,
    pub flight_id: Option<FlightId>,
    pub booking_date: Option<NaiveDate>,
}

/// Booking fields that passed validation and are ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: CustomerId,
    pub flight_id: FlightId,
    pub booking_date: NaiveDate,
}

/// A persisted booking with its customer and flight resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub customer: Customer,
    pub flight: Flight,
    pub booking_date: NaiveDate,
}

pub(crate) fn check_booking_date(
    validator: &mut Validator,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    validator.required("bookingDate", date, |date| {
        in_past(*date, today, BOOKING_DATE_MESSAGE)
    })
}

impl BookingDraft {
    /// Check every field against `today`, collecting all violations.
    pub fn validate(self, today: NaiveDate) -> Result<NewBooking, ValidationFailed> {
        let mut validator = Validator::new();
        let customer_id = validator.required("customer", self.customer_id, |_| Ok(()));
        let flight_id = validator.required("flight", self.flight_id, |_| Ok(()));
        let booking_date = check_booking_date(&mut validator, self.booking_date, today);

        validator.finish("Booking", || {
            Some(NewBooking {
                customer_id: customer_id?,
                flight_id: flight_id?,
                booking_date: booking_date?,
            })
        })
    }
}
