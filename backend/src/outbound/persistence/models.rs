//! Internal Diesel row structs.
//!
//! These never leave the persistence layer. Write structs borrow from the
//! validated domain values and double as changesets for full replacement.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    BookingId, Customer, CustomerId, Flight, FlightId, NewBooking, NewCustomer, NewFlight,
    NewTravelAgent, TravelAgent, TravelAgentId,
};

use super::schema::{bookings, customers, flights, travel_agents};

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
pub(crate) struct CustomerRecord<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a NewCustomer> for CustomerRecord<'a> {
    fn from(customer: &'a NewCustomer) -> Self {
        Self {
            first_name: &customer.first_name,
            last_name: &customer.last_name,
            email: &customer.email,
            phone_number: &customer.phone_number,
            birth_date: customer.birth_date,
        }
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            birth_date: row.birth_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Flights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = flights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FlightRow {
    pub id: i64,
    pub flight_number: String,
    pub departure: String,
    pub destination: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = flights)]
pub(crate) struct FlightRecord<'a> {
    pub flight_number: &'a str,
    pub departure: &'a str,
    pub destination: &'a str,
}

impl<'a> From<&'a NewFlight> for FlightRecord<'a> {
    fn from(flight: &'a NewFlight) -> Self {
        Self {
            flight_number: &flight.flight_number,
            departure: &flight.departure,
            destination: &flight.destination,
        }
    }
}

impl FlightRow {
    /// Combine the row with the ids of the bookings that reference it.
    pub(crate) fn into_flight(self, booking_ids: Vec<BookingId>) -> Flight {
        Flight {
            id: FlightId::new(self.id),
            flight_number: self.flight_number,
            departure: self.departure,
            destination: self.destination,
            booking_ids,
        }
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i64,
    pub customer_id: i64,
    pub flight_id: i64,
    pub booking_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Insertable, AsChangeset)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRecord {
    pub customer_id: i64,
    pub flight_id: i64,
    pub booking_date: NaiveDate,
}

impl From<&NewBooking> for BookingRecord {
    fn from(booking: &NewBooking) -> Self {
        Self {
            customer_id: booking.customer_id.get(),
            flight_id: booking.flight_id.get(),
            booking_date: booking.booking_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Travel agents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = travel_agents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TravelAgentRow {
    pub id: i64,
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    pub booking_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Insertable, AsChangeset)]
#[diesel(table_name = travel_agents)]
pub(crate) struct TravelAgentRecord {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    pub booking_date: NaiveDate,
}

impl From<&NewTravelAgent> for TravelAgentRecord {
    fn from(agent: &NewTravelAgent) -> Self {
        Self {
            customer_id: agent.customer_id,
            hotel_id: agent.hotel_id,
            flight_id: agent.flight_id,
            taxi_id: agent.taxi_id,
            booking_date: agent.booking_date,
        }
    }
}

impl From<TravelAgentRow> for TravelAgent {
    fn from(row: TravelAgentRow) -> Self {
        Self {
            id: TravelAgentId::new(row.id),
            customer_id: row.customer_id,
            hotel_id: row.hotel_id,
            flight_id: row.flight_id,
            taxi_id: row.taxi_id,
            booking_date: row.booking_date,
        }
    }
}
