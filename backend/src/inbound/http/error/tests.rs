//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("customer repository error: connection refused")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "dsn" }))
}

async fn body_of(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialises")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::validation_failed("Bad Request"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("mismatch"), StatusCode::CONFLICT)]
#[case(Error::duplicate_key("Unique Email Violation"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_of(response).await;
    assert_eq!(body.message(), "Internal server error");
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_details() {
    let error = Error::duplicate_key("Unique Email Violation")
        .with_details(json!({ "email": "That email is already used, please use a unique email" }));
    let body = body_of(ResponseError::error_response(&error)).await;
    assert_eq!(body.code(), ErrorCode::DuplicateKey);
    assert!(body.details().and_then(|d| d.get("email")).is_some());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_of(response).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert_eq!(body.message(), "Bad Request");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_details_hide_parser_text() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    let body = body_of(err.error_response()).await;
    assert_eq!(
        body.details().and_then(|d| d.get("body")).and_then(|v| v.as_str()),
        Some("Request body is missing or malformed")
    );
}

#[rstest]
#[actix_web::test]
async fn unparseable_path_becomes_not_found() {
    let req = TestRequest::get()
        .uri("/api/v1/customers/99999999999999999999")
        .to_http_request();
    let cause = "99999999999999999999"
        .parse::<i64>()
        .expect_err("wider than i64");
    let err = path_error_handler(
        PathError::Deserialize(serde::de::Error::custom(cause)),
        &req,
    );
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_of(response).await;
    assert_eq!(body.code(), ErrorCode::NotFound);
    assert!(!body.message().contains("i64"));
}
