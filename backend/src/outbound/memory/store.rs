//! In-memory implementation of every repository port.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, CustomerRepository, CustomerRepositoryError,
    FlightRepository, FlightRepositoryError, GuestBookingRepository, GuestBookingRepositoryError,
    TravelAgentRepository, TravelAgentRepositoryError,
};
use crate::domain::{
    Booking, BookingId, Customer, CustomerId, Flight, FlightId, NewBooking, NewCustomer,
    NewFlight, NewGuestBooking, NewTravelAgent, TravelAgent, TravelAgentId,
};

use super::tables::{Tables, Violation};

const POISONED: &str = "in-memory store lock poisoned";

/// Shared in-memory tables. Clones share state.
///
/// ```
/// use travel_backend::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let shared = store.clone();
/// assert_eq!(store.customer_count(), shared.customer_count());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables.lock().map_err(|_| POISONED.to_owned())
    }

    /// Number of stored customers, zero if the lock is poisoned.
    pub fn customer_count(&self) -> usize {
        self.lock().map(|tables| tables.customers().count()).unwrap_or_default()
    }

    /// Number of stored bookings, zero if the lock is poisoned.
    pub fn booking_count(&self) -> usize {
        self.lock().map(|tables| tables.bookings().count()).unwrap_or_default()
    }
}

fn sorted_customers(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by(|a, b| {
        (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
    });
    customers
}

fn customer_violation(violation: Violation) -> CustomerRepositoryError {
    match violation {
        Violation::DuplicateEmail(email) => CustomerRepositoryError::duplicate_email(email),
        other => CustomerRepositoryError::query(format!("{other:?}")),
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(sorted_customers(tables.customers().collect()))
    }

    async fn find_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(tables.customer(id.get()))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(tables.customer_by_email(email))
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(sorted_customers(
            tables.customers().filter(|c| c.first_name == first_name).collect(),
        ))
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(sorted_customers(
            tables.customers().filter(|c| c.last_name == last_name).collect(),
        ))
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerRepositoryError> {
        let mut tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        tables.insert_customer(customer).map_err(customer_violation)
    }

    async fn update(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        tables
            .replace_customer(id.get(), customer)
            .map_err(customer_violation)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError> {
        let mut tables = self.lock().map_err(CustomerRepositoryError::connection)?;
        Ok(tables.remove_customer(id.get()))
    }
}

fn flight_violation(violation: Violation) -> FlightRepositoryError {
    match violation {
        Violation::DuplicateFlightNumber(number) => {
            FlightRepositoryError::duplicate_flight_number(number)
        }
        other => FlightRepositoryError::query(format!("{other:?}")),
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Flight>, FlightRepositoryError> {
        let tables = self.lock().map_err(FlightRepositoryError::connection)?;
        let mut flights: Vec<Flight> = tables.flights().collect();
        flights.sort_by(|a, b| (&a.flight_number, a.id).cmp(&(&b.flight_number, b.id)));
        Ok(flights)
    }

    async fn find_by_id(&self, id: FlightId) -> Result<Option<Flight>, FlightRepositoryError> {
        let tables = self.lock().map_err(FlightRepositoryError::connection)?;
        Ok(tables.flight(id.get()))
    }

    async fn find_by_flight_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, FlightRepositoryError> {
        let tables = self.lock().map_err(FlightRepositoryError::connection)?;
        Ok(tables.flight_by_number(flight_number))
    }

    async fn create(&self, flight: &NewFlight) -> Result<Flight, FlightRepositoryError> {
        let mut tables = self.lock().map_err(FlightRepositoryError::connection)?;
        tables.insert_flight(flight).map_err(flight_violation)
    }

    async fn update(
        &self,
        id: FlightId,
        flight: &NewFlight,
    ) -> Result<Option<Flight>, FlightRepositoryError> {
        let mut tables = self.lock().map_err(FlightRepositoryError::connection)?;
        tables.replace_flight(id.get(), flight).map_err(flight_violation)
    }

    async fn delete(&self, id: FlightId) -> Result<bool, FlightRepositoryError> {
        let mut tables = self.lock().map_err(FlightRepositoryError::connection)?;
        Ok(tables.remove_flight(id.get()))
    }
}

fn booking_violation(violation: Violation) -> BookingRepositoryError {
    match violation {
        Violation::MissingCustomer(id) => BookingRepositoryError::missing_customer(id),
        Violation::MissingFlight(id) => BookingRepositoryError::missing_flight(id),
        other => BookingRepositoryError::query(format!("{other:?}")),
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.lock().map_err(BookingRepositoryError::connection)?;
        Ok(tables.bookings().collect())
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        let tables = self.lock().map_err(BookingRepositoryError::connection)?;
        Ok(tables.booking(id.get()))
    }

    async fn find_by_customer_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.lock().map_err(BookingRepositoryError::connection)?;
        Ok(tables
            .bookings()
            .filter(|b| b.customer.first_name == first_name)
            .collect())
    }

    async fn find_by_customer_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.lock().map_err(BookingRepositoryError::connection)?;
        Ok(tables
            .bookings()
            .filter(|b| b.customer.last_name == last_name)
            .collect())
    }

    async fn create(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut tables = self.lock().map_err(BookingRepositoryError::connection)?;
        tables.insert_booking(booking).map_err(booking_violation)
    }

    async fn update(
        &self,
        id: BookingId,
        booking: &NewBooking,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut tables = self.lock().map_err(BookingRepositoryError::connection)?;
        tables.replace_booking(id.get(), booking).map_err(booking_violation)
    }

    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut tables = self.lock().map_err(BookingRepositoryError::connection)?;
        Ok(tables.remove_booking(id.get()))
    }
}

#[async_trait]
impl TravelAgentRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError> {
        let tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables.travel_agents().collect())
    }

    async fn find_by_id(
        &self,
        id: TravelAgentId,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError> {
        let tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables.travel_agent(id.get()))
    }

    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<TravelAgent>, TravelAgentRepositoryError> {
        let tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables
            .travel_agents()
            .filter(|agent| agent.customer_id == customer_id)
            .collect())
    }

    async fn create(
        &self,
        agent: &NewTravelAgent,
    ) -> Result<TravelAgent, TravelAgentRepositoryError> {
        let mut tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables.insert_travel_agent(agent))
    }

    async fn update(
        &self,
        id: TravelAgentId,
        agent: &NewTravelAgent,
    ) -> Result<Option<TravelAgent>, TravelAgentRepositoryError> {
        let mut tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables.replace_travel_agent(id.get(), agent))
    }

    async fn delete(&self, id: TravelAgentId) -> Result<bool, TravelAgentRepositoryError> {
        let mut tables = self.lock().map_err(TravelAgentRepositoryError::connection)?;
        Ok(tables.remove_travel_agent(id.get()))
    }
}

fn guest_booking_violation(violation: Violation) -> GuestBookingRepositoryError {
    match violation {
        Violation::DuplicateEmail(email) => GuestBookingRepositoryError::duplicate_email(email),
        Violation::MissingFlight(id) => GuestBookingRepositoryError::missing_flight(id),
        other => GuestBookingRepositoryError::query(format!("{other:?}")),
    }
}

#[async_trait]
impl GuestBookingRepository for InMemoryStore {
    /// Writes into a copy of the tables and swaps it in only when both
    /// inserts succeed.
    async fn create(
        &self,
        guest_booking: &NewGuestBooking,
    ) -> Result<Booking, GuestBookingRepositoryError> {
        let mut tables = self.lock().map_err(GuestBookingRepositoryError::connection)?;
        let mut working = tables.clone();

        let customer = working
            .insert_customer(&guest_booking.customer)
            .map_err(guest_booking_violation)?;
        let booking = working
            .insert_booking(&NewBooking {
                customer_id: customer.id,
                flight_id: guest_booking.leg.flight_id,
                booking_date: guest_booking.leg.booking_date,
            })
            .map_err(guest_booking_violation)?;

        *tables = working;
        debug!(customer_id = %customer.id, booking_id = %booking.id, "guest booking swapped in");
        Ok(booking)
    }
}
