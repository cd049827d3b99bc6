//! Domain ports for the hexagonal boundary.
//!
//! Repository traits are driven ports implemented by outbound adapters.
//! Command and query traits are driving ports implemented by the domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_command;
mod booking_query;
mod booking_repository;
mod customer_command;
mod customer_query;
mod customer_repository;
mod flight_command;
mod flight_query;
mod flight_repository;
mod guest_booking_command;
mod guest_booking_repository;
mod travel_agent_command;
mod travel_agent_query;
mod travel_agent_repository;

pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_query::{BookingFilter, BookingQuery};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
pub use customer_command::CustomerCommand;
#[cfg(test)]
pub use customer_command::MockCustomerCommand;
#[cfg(test)]
pub use customer_query::MockCustomerQuery;
pub use customer_query::{CustomerFilter, CustomerQuery};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerRepository, CustomerRepositoryError};
pub use flight_command::FlightCommand;
#[cfg(test)]
pub use flight_command::MockFlightCommand;
#[cfg(test)]
pub use flight_query::MockFlightQuery;
pub use flight_query::{FlightFilter, FlightQuery};
#[cfg(test)]
pub use flight_repository::MockFlightRepository;
pub use flight_repository::{FlightRepository, FlightRepositoryError};
pub use guest_booking_command::GuestBookingCommand;
#[cfg(test)]
pub use guest_booking_command::MockGuestBookingCommand;
#[cfg(test)]
pub use guest_booking_repository::MockGuestBookingRepository;
pub use guest_booking_repository::{GuestBookingRepository, GuestBookingRepositoryError};
#[cfg(test)]
pub use travel_agent_command::MockTravelAgentCommand;
pub use travel_agent_command::TravelAgentCommand;
#[cfg(test)]
pub use travel_agent_query::MockTravelAgentQuery;
pub use travel_agent_query::{TravelAgentFilter, TravelAgentQuery};
#[cfg(test)]
pub use travel_agent_repository::MockTravelAgentRepository;
pub use travel_agent_repository::{TravelAgentRepository, TravelAgentRepositoryError};
