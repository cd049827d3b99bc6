//! Customer domain service implementing the customer driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CustomerCommand, CustomerFilter, CustomerQuery, CustomerRepository, CustomerRepositoryError,
};
use crate::domain::service_support::{
    duplicate_email, not_found, retain_common, storage_failure, today,
};
use crate::domain::{Customer, CustomerDraft, CustomerId, Error};

const ENTITY: &str = "Customer";

/// Customer service: validation and email uniqueness in front of the repository.
#[derive(Clone)]
pub struct CustomerService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CustomerService<R> {
    /// Create a new service over `repo`, judging birth dates with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn map_customer_error(error: CustomerRepositoryError) -> Error {
    match error {
        CustomerRepositoryError::DuplicateEmail { .. } => duplicate_email(),
        other => storage_failure(ENTITY, other.kind(), &other),
    }
}

impl<R> CustomerService<R>
where
    R: CustomerRepository,
{
    async fn require(&self, id: CustomerId) -> Result<Customer, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_customer_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Fail with `DuplicateKey` when another customer already owns `email`.
    async fn ensure_email_free(&self, email: &str, owner: Option<CustomerId>) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_email(email)
            .await
            .map_err(map_customer_error)?;
        match existing {
            Some(customer) if Some(customer.id) != owner => Err(duplicate_email()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> CustomerQuery for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn list(&self, filter: CustomerFilter) -> Result<Vec<Customer>, Error> {
        let CustomerFilter {
            first_name,
            last_name,
        } = filter;
        let customers = match (first_name, last_name) {
            (None, None) => self.repo.find_all().await,
            (Some(first), None) => self.repo.find_by_first_name(&first).await,
            (None, Some(last)) => self.repo.find_by_last_name(&last).await,
            (Some(first), Some(last)) => {
                let by_first = self
                    .repo
                    .find_by_first_name(&first)
                    .await
                    .map_err(map_customer_error)?;
                let by_last = self
                    .repo
                    .find_by_last_name(&last)
                    .await
                    .map_err(map_customer_error)?;
                Ok(retain_common(by_first, &by_last, |c| c.id))
            }
        };
        customers.map_err(map_customer_error)
    }

    async fn get(&self, id: CustomerId) -> Result<Customer, Error> {
        self.require(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Customer, Error> {
        self.repo
            .find_by_email(email)
            .await
            .map_err(map_customer_error)?
            .ok_or_else(|| {
                Error::not_found(format!("No Customer with the email {email} was found!"))
            })
    }
}

#[async_trait]
impl<R> CustomerCommand for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn create(&self, draft: CustomerDraft) -> Result<Customer, Error> {
        let customer = draft.validate(today(self.clock.as_ref()))?;
        self.ensure_email_free(&customer.email, None).await?;

        let created = self
            .repo
            .create(&customer)
            .await
            .map_err(map_customer_error)?;
        info!(customer_id = %created.id, "customer created");
        Ok(created)
    }

    async fn update(&self, id: CustomerId, draft: CustomerDraft) -> Result<Customer, Error> {
        self.require(id).await?;
        let customer = draft.validate(today(self.clock.as_ref()))?;
        self.ensure_email_free(&customer.email, Some(id)).await?;

        let updated = self
            .repo
            .update(id, &customer)
            .await
            .map_err(map_customer_error)?
            .ok_or_else(|| not_found(ENTITY, id))?;
        info!(customer_id = %id, "customer updated");
        Ok(updated)
    }

    async fn delete(&self, id: CustomerId) -> Result<(), Error> {
        self.require(id).await?;
        let removed = self.repo.delete(id).await.map_err(map_customer_error)?;
        if !removed {
            return Err(not_found(ENTITY, id));
        }
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
