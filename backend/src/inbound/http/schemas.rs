//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or its payload is missing.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// One or more fields broke their constraints.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request contradicts the resource it targets.
    #[schema(rename = "conflict")]
    Conflict,
    /// A unique value is already taken.
    #[schema(rename = "duplicate_key")]
    DuplicateKey,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// `details` maps offending field names to messages.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Bad Request")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field name to message map.
    #[schema(example = json!({ "email": "That email is already used, please use a unique email" }))]
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema = serde_json::to_value(ErrorSchema::schema()).expect("schema serialises");
        let properties = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .expect("object schema");
        assert!(properties.contains_key("traceId"));
        assert!(properties.contains_key("details"));
    }
}
