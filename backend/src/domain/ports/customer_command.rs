//! Driving port for customer mutations.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerDraft, CustomerId, Error};

/// Domain use-case port for writing customers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerCommand: Send + Sync {
    /// Validate and persist a new customer with a unique email.
    async fn create(&self, draft: CustomerDraft) -> Result<Customer, Error>;

    /// Validate and replace an existing customer.
    async fn update(&self, id: CustomerId, draft: CustomerDraft) -> Result<Customer, Error>;

    /// Remove an existing customer.
    async fn delete(&self, id: CustomerId) -> Result<(), Error>;
}
