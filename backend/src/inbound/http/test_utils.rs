//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::service_support::test_clock::fixture_clock;
use crate::inbound::http::api_services;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::outbound::memory::InMemoryStore;

/// Store-backed state with the clock frozen at 2024-06-01.
pub(crate) fn memory_state() -> (Arc<InMemoryStore>, web::Data<HttpState>) {
    let store = Arc::new(InMemoryStore::default());
    let ports = Repositories::shared(store.clone()).into_ports(fixture_clock());
    (store, web::Data::new(HttpState::new(ports)))
}

/// Application with every API route mounted over `state`.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).configure(api_services)
}

/// A customer payload that passes validation.
pub(crate) fn customer_json(email: &str) -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": email,
        "phoneNumber": "(212) 555-1234",
        "birthDate": "1985-10-10"
    })
}

/// A flight payload that passes validation.
pub(crate) fn flight_json(number: &str) -> Value {
    json!({
        "flightNumber": number,
        "departure": "LHR",
        "destination": "NCL"
    })
}

/// POST `body` to `uri` and return the raw response.
pub(crate) async fn post_json<S>(app: &S, uri: &str, body: &Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, test::TestRequest::post().uri(uri).set_json(body).to_request()).await
}

/// PUT `body` to `uri` and return the raw response.
pub(crate) async fn put_json<S>(app: &S, uri: &str, body: &Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, test::TestRequest::put().uri(uri).set_json(body).to_request()).await
}

/// GET `uri` and return the raw response.
pub(crate) async fn get<S>(app: &S, uri: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await
}

/// DELETE `uri` and return the raw response.
pub(crate) async fn delete<S>(app: &S, uri: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, test::TestRequest::delete().uri(uri).to_request()).await
}

/// POST a resource that must be created and return its assigned id.
pub(crate) async fn create<S>(app: &S, uri: &str, body: &Value) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = post_json(app, uri, body).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CREATED, "create {uri}");
    let created: Value = test::read_body_json(res).await;
    created
        .get("id")
        .and_then(Value::as_i64)
        .expect("created resource has an id")
}
