//! Flight aggregate and its field constraints.

use crate::domain::validation::{
    NAME_PATTERN_MESSAGE, Rule, ValidationFailed, Validator, alphanumeric_regex, length_within,
    matches, name_regex, not_empty,
};
use crate::domain::{BookingId, FlightId};

/// Unvalidated flight fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightDraft {
    pub flight_number: String,
    pub departure: String,
    pub destination: String,
}

/// Flight fields that passed validation and are ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    pub flight_number: String,
    pub departure: String,
    pub destination: String,
}

/// A persisted flight.
///
/// `booking_ids` is the read-only back-reference to bookings made on this
/// flight, ascending by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub id: FlightId,
    pub flight_number: String,
    pub departure: String,
    pub destination: String,
    pub booking_ids: Vec<BookingId>,
}

fn airport_code(value: &str) -> Rule {
    not_empty(value)?;
    length_within(value, 1, 3)?;
    matches(value, name_regex(), NAME_PATTERN_MESSAGE)
}

impl FlightDraft {
    /// Check every field, collecting all violations.
    pub fn validate(self) -> Result<NewFlight, ValidationFailed> {
        let mut validator = Validator::new();
        validator.check("flightNumber", || {
            not_empty(&self.flight_number)?;
            length_within(&self.flight_number, 1, 5)?;
            matches(&self.flight_number, alphanumeric_regex(), NAME_PATTERN_MESSAGE)
        });
        validator.check("departure", || airport_code(&self.departure));
        validator.check("destination", || airport_code(&self.destination));

        validator.finish("Flight", || {
            Some(NewFlight {
                flight_number: self.flight_number,
                departure: self.departure,
                destination: self.destination,
            })
        })
    }
}

impl NewFlight {
    /// Attach a store identity. New flights carry no bookings.
    pub fn with_id(self, id: FlightId) -> Flight {
        Flight {
            id,
            flight_number: self.flight_number,
            departure: self.departure,
            destination: self.destination,
            booking_ids: Vec::new(),
        }
    }
}
