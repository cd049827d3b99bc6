//! Driving port for customer reads.
//!
//! Inbound adapters use this port to list and fetch customers without
//! importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerId, Error};

/// Optional exact-match filters for listing customers.
///
/// With both names set, only customers matching both are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Domain use-case port for reading customers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerQuery: Send + Sync {
    /// List customers, narrowed by `filter`.
    async fn list(&self, filter: CustomerFilter) -> Result<Vec<Customer>, Error>;

    /// Fetch one customer or fail with `NotFound`.
    async fn get(&self, id: CustomerId) -> Result<Customer, Error>;

    /// Fetch the customer owning `email` or fail with `NotFound`.
    async fn get_by_email(&self, email: &str) -> Result<Customer, Error>;
}
