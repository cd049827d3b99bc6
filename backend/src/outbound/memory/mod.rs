//! Process-local store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. It
//! enforces the same constraints as the SQL schema: unique email and flight
//! number, booking references, and cascading deletes.

mod store;
mod tables;

pub use store::InMemoryStore;
