//! PostgreSQL-backed `CustomerRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};
use crate::domain::{Customer, CustomerId, NewCustomer};

use super::diesel_helpers::{CUSTOMER_EMAIL_CONSTRAINT, StoreFailure, classify};
use super::models::{CustomerRecord, CustomerRow};
use super::pool::{DbPool, PoolError};
use super::schema::customers;

/// Diesel implementation of the customer repository port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Serve customers from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    CustomerRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => CustomerRepositoryError::connection(message),
        other => CustomerRepositoryError::query(other.into_message()),
    }
}

/// Writes additionally recognise the unique email constraint.
fn map_write_error(error: diesel::result::Error, email: &str) -> CustomerRepositoryError {
    match classify(error) {
        failure @ StoreFailure::UniqueViolation { .. }
            if failure.names(CUSTOMER_EMAIL_CONSTRAINT) =>
        {
            CustomerRepositoryError::duplicate_email(email)
        }
        StoreFailure::Connection(message) => CustomerRepositoryError::connection(message),
        other => CustomerRepositoryError::query(other.into_message()),
    }
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerRow> = customers::table
            .select(CustomerRow::as_select())
            .order_by((
                customers::last_name.asc(),
                customers::first_name.asc(),
                customers::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomerRow> = customers::table
            .find(id.get())
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomerRow> = customers::table
            .filter(customers::email.eq(email))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerRow> = customers::table
            .filter(customers::first_name.eq(first_name))
            .select(CustomerRow::as_select())
            .order_by((customers::last_name.asc(), customers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerRow> = customers::table
            .filter(customers::last_name.eq(last_name))
            .select(CustomerRow::as_select())
            .order_by((customers::first_name.asc(), customers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CustomerRow = diesel::insert_into(customers::table)
            .values(CustomerRecord::from(customer))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &customer.email))?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomerRow> = diesel::update(customers::table.find(id.get()))
            .set(CustomerRecord::from(customer))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, &customer.email))?;
        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(customers::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_on_write_is_duplicate_email() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value")),
        );
        assert_eq!(
            map_write_error(error, "jane@mailinator.com"),
            CustomerRepositoryError::duplicate_email("jane@mailinator.com")
        );
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("gone")),
        );
        assert!(matches!(
            map_diesel_error(error),
            CustomerRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            CustomerRepositoryError::connection("timed out")
        );
    }
}
