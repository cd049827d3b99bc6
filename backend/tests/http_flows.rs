//! End-to-end HTTP flows against the in-memory store.
//!
//! The application is assembled the way the server assembles it: trace
//! middleware, every `/api/v1` resource and the health probes.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};
use travel_backend::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use travel_backend::outbound::memory::InMemoryStore;

mod support;

use support::{PAST_DATE, customer_json, flight_json, memory_app};

macro_rules! call {
    ($app:expr, $req:expr) => {
        test::call_service(&$app, $req.to_request()).await
    };
}

async fn created_id(res: actix_web::dev::ServiceResponse) -> i64 {
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("created id")
}

#[rstest]
#[actix_web::test]
async fn customer_flight_booking_lifecycle() {
    let store = Arc::new(InMemoryStore::default());
    let app = test::init_service(memory_app(store.clone())).await;

    let customer = created_id(call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/customers")
            .set_json(customer_json("Jane", "jane@mailinator.com"))
    ))
    .await;
    let flight = created_id(call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/flights")
            .set_json(flight_json("TR101"))
    ))
    .await;
    let booking = created_id(call!(
        app,
        test::TestRequest::post().uri("/api/v1/bookings").set_json(json!({
            "customer": { "id": customer },
            "flight": { "id": flight },
            "bookingDate": PAST_DATE
        }))
    ))
    .await;

    let res = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/bookings/{booking}"))
    );
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["customer"]["email"], "jane@mailinator.com");
    assert_eq!(body["flight"]["flightNumber"], "TR101");
    assert_eq!(body["bookingDate"], PAST_DATE);

    let res = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/flights/{flight}"))
    );
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.booking_count(), 0);
    assert_eq!(store.customer_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn guest_booking_is_all_or_nothing() {
    let store = Arc::new(InMemoryStore::default());
    let app = test::init_service(memory_app(store.clone())).await;
    let flight = created_id(call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/flights")
            .set_json(flight_json("TR202"))
    ))
    .await;

    let mut bad_customer = customer_json("Gu3st", "guest@mailinator.com");
    bad_customer["birthDate"] = json!("2999-01-01");
    let res = call!(
        app,
        test::TestRequest::post().uri("/api/v1/guestBooking").set_json(json!({
            "customer": bad_customer,
            "booking": { "flight": { "id": flight }, "bookingDate": PAST_DATE }
        }))
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Error = test::read_body_json(res).await;
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    let details = err.details().expect("details");
    assert!(details.get("firstName").is_some());
    assert!(details.get("birthDate").is_some());
    assert_eq!((store.customer_count(), store.booking_count()), (0, 0));

    let res = call!(
        app,
        test::TestRequest::post().uri("/api/v1/guestBooking").set_json(json!({
            "customer": customer_json("Guest", "guest@mailinator.com"),
            "booking": { "flight": { "id": flight }, "bookingDate": PAST_DATE }
        }))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let booking: Value = test::read_body_json(res).await;
    assert_eq!(booking["customer"]["firstName"], "Guest");
    assert_eq!((store.customer_count(), store.booking_count()), (1, 1));

    let res = call!(
        app,
        test::TestRequest::get().uri("/api/v1/customers/email/guest@mailinator.com")
    );
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_reports_fixed_detail() {
    let app = test::init_service(memory_app(Arc::new(InMemoryStore::default()))).await;
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let res = call!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/customers")
                .set_json(customer_json("Jane", "jane@mailinator.com"))
        );
        assert_eq!(res.status(), expected);
        if expected == StatusCode::CONFLICT {
            let err: Error = test::read_body_json(res).await;
            assert_eq!(err.code(), ErrorCode::DuplicateKey);
            assert_eq!(
                err.details().and_then(|d| d.get("email")).and_then(Value::as_str),
                Some("That email is already used, please use a unique email")
            );
        }
    }
}

#[rstest]
#[case("/api/v1/customers/1", customer_json("Jane", "jane@mailinator.com"))]
#[case("/api/v1/flights/1", flight_json("TR303"))]
#[case("/api/v1/travelAgents/1", json!({ "bookingDate": PAST_DATE }))]
#[actix_web::test]
async fn replace_with_other_id_conflicts_before_storage(
    #[case] uri: &str,
    #[case] mut body: Value,
) {
    let store = Arc::new(InMemoryStore::default());
    let app = test::init_service(memory_app(store.clone())).await;
    body["id"] = json!(2);

    let res = call!(app, test::TestRequest::put().uri(uri).set_json(&body));
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: Error = test::read_body_json(res).await;
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert!(err.details().and_then(|d| d.get("id")).is_some());
    assert_eq!(store.customer_count(), 0);
}

#[rstest]
#[case("/api/v1/customers/abc")]
#[case("/api/v1/flights/1x")]
#[case("/api/v1/bookings/-1")]
#[case("/api/v1/travelAgents/one")]
#[actix_web::test]
async fn non_numeric_ids_are_not_routed(#[case] uri: &str) {
    let app = test::init_service(memory_app(Arc::new(InMemoryStore::default()))).await;
    let res = call!(app, test::TestRequest::get().uri(uri));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn errors_echo_the_trace_id() {
    let app = test::init_service(memory_app(Arc::new(InMemoryStore::default()))).await;
    let res = call!(app, test::TestRequest::get().uri("/api/v1/flights/9"));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let err: Error = test::read_body_json(res).await;
    assert_eq!(err.message(), "No Flight with the id 9 was found!");
    assert_eq!(err.trace_id(), Some(header.as_str()));
}

#[rstest]
#[actix_web::test]
async fn health_probes_answer() {
    let app = test::init_service(memory_app(Arc::new(InMemoryStore::default()))).await;
    for uri in ["/health/ready", "/health/live"] {
        let res = call!(app, test::TestRequest::get().uri(uri));
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}
