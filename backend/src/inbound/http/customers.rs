//! Customer HTTP handlers.
//!
//! ```text
//! GET    /api/v1/customers?firstname=&lastname=
//! GET    /api/v1/customers/{id}
//! GET    /api/v1/customers/email/{email}
//! POST   /api/v1/customers
//! PUT    /api/v1/customers/{id}
//! DELETE /api/v1/customers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CustomerFilter;
use crate::domain::{Customer, CustomerDraft, CustomerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Resource, reconcile_body_id};

/// Customer payload accepted by create and replace.
///
/// Absent text fields are treated as empty so they surface as field
/// violations rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    /// Required on replace; ignored on create.
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "jane@mailinator.com")]
    pub email: Option<String>,
    #[schema(example = "(212) 555-1234")]
    pub phone_number: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1985-10-10")]
    pub birth_date: Option<NaiveDate>,
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(value: CustomerRequest) -> Self {
        Self {
            first_name: value.first_name.unwrap_or_default(),
            last_name: value.last_name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            phone_number: value.phone_number.unwrap_or_default(),
            birth_date: value.birth_date,
        }
    }
}

/// Stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[schema(value_type = String, format = Date, example = "1985-10-10")]
    pub birth_date: NaiveDate,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id.get(),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone_number: value.phone_number,
            birth_date: value.birth_date,
        }
    }
}

/// Optional exact-match name filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// Exact first name.
    pub firstname: Option<String>,
    /// Exact last name.
    pub lastname: Option<String>,
}

/// List customers ordered by last name then first name.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    params(CustomerListQuery),
    responses(
        (status = 200, description = "Customers", body = [CustomerResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    query: web::Query<CustomerListQuery>,
) -> ApiResult<web::Json<Vec<CustomerResponse>>> {
    let CustomerListQuery {
        firstname,
        lastname,
    } = query.into_inner();
    let customers = state
        .customers_query
        .list(CustomerFilter {
            first_name: firstname,
            last_name: lastname,
        })
        .await?;
    Ok(web::Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// Fetch a customer by id.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer", body = CustomerResponse),
        (status = 404, description = "No such customer", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/customers/{id:\\d+}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CustomerResponse>> {
    let customer = state
        .customers_query
        .get(CustomerId::new(path.into_inner()))
        .await?;
    Ok(web::Json(customer.into()))
}

/// Fetch the customer owning an email address.
#[utoipa::path(
    get,
    path = "/api/v1/customers/email/{email}",
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Customer", body = CustomerResponse),
        (status = 404, description = "No customer with that email", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomerByEmail"
)]
#[get("/customers/email/{email}")]
pub async fn get_customer_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CustomerResponse>> {
    let customer = state.customers_query.get_by_email(&path).await?;
    Ok(web::Json(customer.into()))
}

/// Create a customer.
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid customer", body = ErrorSchema),
        (status = 409, description = "Email already used", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    payload: web::Json<CustomerRequest>,
) -> ApiResult<HttpResponse> {
    let customer = state.customers.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// Replace a customer.
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer replaced", body = CustomerResponse),
        (status = 400, description = "Invalid customer", body = ErrorSchema),
        (status = 404, description = "No such customer", body = ErrorSchema),
        (status = 409, description = "Id mismatch or email already used", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/customers/{id:\\d+}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CustomerRequest>,
) -> ApiResult<web::Json<CustomerResponse>> {
    let payload = payload.into_inner();
    let id = CustomerId::new(reconcile_body_id(
        Resource::CUSTOMER,
        path.into_inner(),
        payload.id,
    )?);
    state.customers_query.get(id).await?;
    let customer = state.customers.update(id, payload.into()).await?;
    Ok(web::Json(customer.into()))
}

/// Delete a customer and, with it, their bookings.
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "No such customer", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "deleteCustomer"
)]
#[delete("/customers/{id:\\d+}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .customers
        .delete(CustomerId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
