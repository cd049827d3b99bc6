//! PostgreSQL persistence adapters using Diesel.
//!
//! Every repository port has a Diesel implementation here, backed by a
//! shared [`DbPool`] of `diesel-async` connections. Row structs and table
//! definitions stay private to this module; adapters only translate rows to
//! domain values and Diesel errors to port errors.
//!
//! ```no_run
//! use travel_backend::outbound::persistence::{DbPool, DieselCustomerRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/travel")).await?;
//! let customers = DieselCustomerRepository::new(pool);
//! # let _ = customers;
//! # Ok(())
//! # }
//! ```

mod diesel_booking_repository;
mod diesel_customer_repository;
mod diesel_flight_repository;
mod diesel_guest_booking_repository;
pub(crate) mod diesel_helpers;
mod diesel_travel_agent_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_flight_repository::DieselFlightRepository;
pub use diesel_guest_booking_repository::DieselGuestBookingRepository;
pub use diesel_travel_agent_repository::DieselTravelAgentRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
