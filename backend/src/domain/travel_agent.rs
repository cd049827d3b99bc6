//! Travel agent records: a denormalised bundle of raw resource ids.
//!
//! Unlike bookings, the customer, hotel, flight and taxi references are plain
//! integers with no relation enforced by the store.

use chrono::NaiveDate;

use crate::domain::TravelAgentId;
use crate::domain::booking::check_booking_date;
use crate::domain::validation::{ValidationFailed, Validator};

/// Unvalidated travel agent fields as received from a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TravelAgentDraft {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    pub booking_date: Option<NaiveDate>,
}

/// Travel agent fields that passed validation and are ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTravelAgent {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    pub booking_date: NaiveDate,
}

/// A persisted travel agent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelAgent {
    pub id: TravelAgentId,
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    pub booking_date: NaiveDate,
}

impl TravelAgentDraft {
    /// Check the booking date against `today`.
    pub fn validate(self, today: NaiveDate) -> Result<NewTravelAgent, ValidationFailed> {
        let mut validator = Validator::new();
        let booking_date = check_booking_date(&mut validator, self.booking_date, today);

        validator.finish("TravelAgent", || {
            Some(NewTravelAgent {
                customer_id: self.customer_id,
                hotel_id: self.hotel_id,
                flight_id: self.flight_id,
                taxi_id: self.taxi_id,
                booking_date: booking_date?,
            })
        })
    }
}

impl NewTravelAgent {
    /// Attach a store identity.
    pub fn with_id(self, id: TravelAgentId) -> TravelAgent {
        TravelAgent {
            id,
            customer_id: self.customer_id,
            hotel_id: self.hotel_id,
            flight_id: self.flight_id,
            taxi_id: self.taxi_id,
            booking_date: self.booking_date,
        }
    }
}
