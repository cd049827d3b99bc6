//! HTTP mapping for domain errors.
//!
//! The domain error type stays HTTP-agnostic; this module decides status
//! codes, echoes the trace id header, and redacts internal failures before
//! they reach clients. Extractor failures (malformed JSON, bad query
//! strings) are folded into the same payload shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::DuplicateKey => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error!(message = error.message(), trace_id = error.trace_id(), "internal error");
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

/// Turn an unreadable JSON body into a 400 `invalid_request`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting request body");
    Error::invalid_request("Bad Request")
        .with_details(json!({ "body": "Request body is missing or malformed" }))
        .into()
}

/// Turn an unparseable query string into a 400 `invalid_request`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting query string");
    Error::invalid_request("Bad Request")
        .with_details(json!({ "query": "Query string could not be parsed" }))
        .into()
}

/// Treat a path segment that does not fit its id type as an unknown resource.
///
/// Digit-only ids wider than 64 bits match the route pattern but can never
/// name a stored row.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejecting path parameters");
    Error::not_found(format!("No resource was found at {}", req.path())).into()
}

#[cfg(test)]
mod tests;
