//! Guest booking: a new customer and their first booking written together.
//!
//! A guest booking is a request-only composition. Its customer has no
//! identity yet, so the booking's customer reference is filled in by the
//! store once the customer row exists, inside the same transaction.

use chrono::NaiveDate;

use crate::domain::booking::check_booking_date;
use crate::domain::validation::{ValidationFailed, Validator};
use crate::domain::{CustomerDraft, FlightId, NewCustomer};

/// Unvalidated guest booking payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestBookingDraft {
    pub customer: CustomerDraft,
    pub flight_id: Option<FlightId>,
    pub booking_date: Option<NaiveDate>,
}

/// Booking half of a guest booking once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestBookingLeg {
    pub flight_id: FlightId,
    pub booking_date: NaiveDate,
}

/// Validated guest booking ready for the composite write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuestBooking {
    pub customer: NewCustomer,
    pub leg: GuestBookingLeg,
}

/// Lifecycle of one composite write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestBookingState {
    /// Transaction opened, nothing visible yet.
    Pending,
    /// Customer and booking are both visible.
    Committed,
    /// Neither write is visible.
    RolledBack,
}

impl GuestBookingState {
    /// Terminal state reached from `Pending` given the write outcome.
    pub fn settle<T, E>(self, outcome: &Result<T, E>) -> Self {
        match (self, outcome) {
            (Self::Pending, Ok(_)) => Self::Committed,
            (Self::Pending, Err(_)) => Self::RolledBack,
            (settled, _) => settled,
        }
    }

    /// Label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

impl GuestBookingDraft {
    /// Validate the booking half against `today`.
    ///
    /// The customer reference is not checked here: it is assigned when the
    /// customer is written.
    pub fn validate_leg(
        flight_id: Option<FlightId>,
        booking_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<GuestBookingLeg, ValidationFailed> {
        let mut validator = Validator::new();
        let flight_id = validator.required("flight", flight_id, |_| Ok(()));
        let booking_date = check_booking_date(&mut validator, booking_date, today);

        validator.finish("Booking", || {
            Some(GuestBookingLeg {
                flight_id: flight_id?,
                booking_date: booking_date?,
            })
        })
    }

    /// Validate both halves, reporting every violation from each.
    pub fn validate(self, today: NaiveDate) -> Result<NewGuestBooking, ValidationFailed> {
        let customer = self.customer.validate(today);
        let leg = Self::validate_leg(self.flight_id, self.booking_date, today);
        match (customer, leg) {
            (Ok(customer), Ok(leg)) => Ok(NewGuestBooking { customer, leg }),
            (Err(customer), Err(leg)) => Err(customer.extend(leg)),
            (Err(failed), Ok(_)) | (Ok(_), Err(failed)) => Err(failed),
        }
    }
}
