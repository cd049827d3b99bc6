//! Outbound adapters implementing the repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel and bb8.
//! - **memory**: a process-local store with the same constraints.
//!
//! Adapters translate between storage rows and domain values. They hold no
//! business rules beyond the constraints the schema itself enforces.

pub mod memory;
pub mod persistence;
