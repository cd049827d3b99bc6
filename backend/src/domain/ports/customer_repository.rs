//! Port for customer persistence.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerId, NewCustomer};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "customer repository query failed: {message}",
        /// The store's unique email constraint rejected the write.
        DuplicateEmail { email: String } =>
            "customer email already in use: {email}",
    }
}

/// Port for customer storage and retrieval.
///
/// Listings are ordered by last name, then first name. Name lookups are
/// exact matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Every customer in natural order.
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Fetch one customer, `None` when absent.
    async fn find_by_id(&self, id: CustomerId)
    -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Fetch the customer owning `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Customers whose first name equals `first_name`.
    async fn find_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Customers whose last name equals `last_name`.
    async fn find_by_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Persist a new customer and return it with its assigned identity.
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerRepositoryError>;

    /// Replace every field of an existing customer.
    ///
    /// Returns `None` when `id` does not exist; nothing is inserted.
    async fn update(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Remove a customer and their bookings. Returns whether a row was removed.
    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError>;
}
