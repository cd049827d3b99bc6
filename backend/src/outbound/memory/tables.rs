//! Table state behind the in-memory store.
//!
//! Rows are keyed by id in `BTreeMap`s so iteration is in id order, like a
//! primary key scan. Relations mirror the SQL schema: unique email and
//! flight number, bookings cascade with their customer or flight.

use std::collections::BTreeMap;

use crate::domain::{
    Booking, BookingId, Customer, CustomerId, Flight, FlightId, NewBooking, NewCustomer,
    NewFlight, NewTravelAgent, TravelAgent, TravelAgentId,
};

/// Constraint a write would break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Violation {
    DuplicateEmail(String),
    DuplicateFlightNumber(String),
    MissingCustomer(i64),
    MissingFlight(i64),
}

/// Monotonic id source, starting at 1.
#[derive(Debug, Clone, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    customer_ids: Sequence,
    flight_ids: Sequence,
    booking_ids: Sequence,
    travel_agent_ids: Sequence,
    customers: BTreeMap<i64, NewCustomer>,
    flights: BTreeMap<i64, NewFlight>,
    bookings: BTreeMap<i64, NewBooking>,
    travel_agents: BTreeMap<i64, NewTravelAgent>,
}

impl Tables {
    // -- customers ----------------------------------------------------------

    pub(super) fn customers(&self) -> impl Iterator<Item = Customer> + '_ {
        self.customers
            .iter()
            .map(|(id, row)| row.clone().with_id(CustomerId::new(*id)))
    }

    pub(super) fn customer(&self, id: i64) -> Option<Customer> {
        self.customers
            .get(&id)
            .map(|row| row.clone().with_id(CustomerId::new(id)))
    }

    fn email_owner(&self, email: &str) -> Option<i64> {
        self.customers
            .iter()
            .find(|(_, row)| row.email == email)
            .map(|(id, _)| *id)
    }

    pub(super) fn customer_by_email(&self, email: &str) -> Option<Customer> {
        self.email_owner(email).and_then(|id| self.customer(id))
    }

    pub(super) fn insert_customer(&mut self, row: &NewCustomer) -> Result<Customer, Violation> {
        if self.email_owner(&row.email).is_some() {
            return Err(Violation::DuplicateEmail(row.email.clone()));
        }
        let id = self.customer_ids.next();
        self.customers.insert(id, row.clone());
        Ok(row.clone().with_id(CustomerId::new(id)))
    }

    pub(super) fn replace_customer(
        &mut self,
        id: i64,
        row: &NewCustomer,
    ) -> Result<Option<Customer>, Violation> {
        if !self.customers.contains_key(&id) {
            return Ok(None);
        }
        if self.email_owner(&row.email).is_some_and(|owner| owner != id) {
            return Err(Violation::DuplicateEmail(row.email.clone()));
        }
        self.customers.insert(id, row.clone());
        Ok(self.customer(id))
    }

    pub(super) fn remove_customer(&mut self, id: i64) -> bool {
        let removed = self.customers.remove(&id).is_some();
        if removed {
            self.bookings.retain(|_, booking| booking.customer_id.get() != id);
        }
        removed
    }

    // -- flights ------------------------------------------------------------

    fn flight_booking_ids(&self, flight_id: i64) -> Vec<BookingId> {
        self.bookings
            .iter()
            .filter(|(_, booking)| booking.flight_id.get() == flight_id)
            .map(|(id, _)| BookingId::new(*id))
            .collect()
    }

    fn assemble_flight(&self, id: i64, row: &NewFlight) -> Flight {
        let mut flight = row.clone().with_id(FlightId::new(id));
        flight.booking_ids = self.flight_booking_ids(id);
        flight
    }

    pub(super) fn flights(&self) -> impl Iterator<Item = Flight> + '_ {
        self.flights
            .iter()
            .map(|(id, row)| self.assemble_flight(*id, row))
    }

    pub(super) fn flight(&self, id: i64) -> Option<Flight> {
        self.flights
            .get(&id)
            .map(|row| self.assemble_flight(id, row))
    }

    fn flight_number_owner(&self, number: &str) -> Option<i64> {
        self.flights
            .iter()
            .find(|(_, row)| row.flight_number == number)
            .map(|(id, _)| *id)
    }

    pub(super) fn flight_by_number(&self, number: &str) -> Option<Flight> {
        self.flight_number_owner(number).and_then(|id| self.flight(id))
    }

    pub(super) fn insert_flight(&mut self, row: &NewFlight) -> Result<Flight, Violation> {
        if self.flight_number_owner(&row.flight_number).is_some() {
            return Err(Violation::DuplicateFlightNumber(row.flight_number.clone()));
        }
        let id = self.flight_ids.next();
        self.flights.insert(id, row.clone());
        Ok(row.clone().with_id(FlightId::new(id)))
    }

    pub(super) fn replace_flight(
        &mut self,
        id: i64,
        row: &NewFlight,
    ) -> Result<Option<Flight>, Violation> {
        if !self.flights.contains_key(&id) {
            return Ok(None);
        }
        if self
            .flight_number_owner(&row.flight_number)
            .is_some_and(|owner| owner != id)
        {
            return Err(Violation::DuplicateFlightNumber(row.flight_number.clone()));
        }
        self.flights.insert(id, row.clone());
        Ok(self.flight(id))
    }

    pub(super) fn remove_flight(&mut self, id: i64) -> bool {
        let removed = self.flights.remove(&id).is_some();
        if removed {
            self.bookings.retain(|_, booking| booking.flight_id.get() != id);
        }
        removed
    }

    // -- bookings -----------------------------------------------------------

    fn assemble_booking(&self, id: i64, row: &NewBooking) -> Option<Booking> {
        Some(Booking {
            id: BookingId::new(id),
            customer: self.customer(row.customer_id.get())?,
            flight: self.flight(row.flight_id.get())?,
            booking_date: row.booking_date,
        })
    }

    pub(super) fn bookings(&self) -> impl Iterator<Item = Booking> + '_ {
        self.bookings
            .iter()
            .filter_map(|(id, row)| self.assemble_booking(*id, row))
    }

    pub(super) fn booking(&self, id: i64) -> Option<Booking> {
        self.bookings
            .get(&id)
            .and_then(|row| self.assemble_booking(id, row))
    }

    fn check_references(&self, row: &NewBooking) -> Result<(), Violation> {
        if !self.customers.contains_key(&row.customer_id.get()) {
            return Err(Violation::MissingCustomer(row.customer_id.get()));
        }
        if !self.flights.contains_key(&row.flight_id.get()) {
            return Err(Violation::MissingFlight(row.flight_id.get()));
        }
        Ok(())
    }

    pub(super) fn insert_booking(&mut self, row: &NewBooking) -> Result<Booking, Violation> {
        self.check_references(row)?;
        let id = self.booking_ids.next();
        self.bookings.insert(id, *row);
        self.booking(id)
            .ok_or(Violation::MissingCustomer(row.customer_id.get()))
    }

    pub(super) fn replace_booking(
        &mut self,
        id: i64,
        row: &NewBooking,
    ) -> Result<Option<Booking>, Violation> {
        if !self.bookings.contains_key(&id) {
            return Ok(None);
        }
        self.check_references(row)?;
        self.bookings.insert(id, *row);
        Ok(self.booking(id))
    }

    pub(super) fn remove_booking(&mut self, id: i64) -> bool {
        self.bookings.remove(&id).is_some()
    }

    // -- travel agents ------------------------------------------------------

    pub(super) fn travel_agents(&self) -> impl Iterator<Item = TravelAgent> + '_ {
        self.travel_agents
            .iter()
            .map(|(id, row)| row.with_id(TravelAgentId::new(*id)))
    }

    pub(super) fn travel_agent(&self, id: i64) -> Option<TravelAgent> {
        self.travel_agents
            .get(&id)
            .map(|row| row.with_id(TravelAgentId::new(id)))
    }

    pub(super) fn insert_travel_agent(&mut self, row: &NewTravelAgent) -> TravelAgent {
        let id = self.travel_agent_ids.next();
        self.travel_agents.insert(id, *row);
        row.with_id(TravelAgentId::new(id))
    }

    pub(super) fn replace_travel_agent(
        &mut self,
        id: i64,
        row: &NewTravelAgent,
    ) -> Option<TravelAgent> {
        let slot = self.travel_agents.get_mut(&id)?;
        *slot = *row;
        Some(row.with_id(TravelAgentId::new(id)))
    }

    pub(super) fn remove_travel_agent(&mut self, id: i64) -> bool {
        self.travel_agents.remove(&id).is_some()
    }
}
