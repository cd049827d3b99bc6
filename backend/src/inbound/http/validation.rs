//! Shared request checks for inbound HTTP adapters.
//!
//! Replace-by-id requests carry the identity twice: once in the path and
//! once in the body. Both copies are reconciled here before any port is
//! called, so a mismatched request never touches storage.

use serde_json::json;

use crate::domain::Error;

/// Resource names used in replace-by-id error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resource {
    /// Type name as it appears in messages, e.g. `TravelAgent`.
    name: &'static str,
    /// Lower-case noun used in the id detail, e.g. `travel agent`.
    noun: &'static str,
}

impl Resource {
    pub(crate) const CUSTOMER: Self = Self::new("Customer", "customer");
    pub(crate) const FLIGHT: Self = Self::new("Flight", "flight");
    pub(crate) const BOOKING: Self = Self::new("Booking", "booking");
    pub(crate) const TRAVEL_AGENT: Self = Self::new("TravelAgent", "travel agent");

    const fn new(name: &'static str, noun: &'static str) -> Self {
        Self { name, noun }
    }

    fn missing_id(self) -> Error {
        Error::invalid_request(format!("Invalid {} supplied in request body", self.name))
    }

    fn mismatched_id(self) -> Error {
        Error::conflict(format!(
            "{name} details supplied in request body conflict with another {name}",
            name = self.name
        ))
        .with_details(json!({
            "id": format!(
                "The {} ID in the request body must match that of the {} being updated",
                self.noun, self.name
            ),
        }))
    }
}

/// Reconcile the body id of a replace request with its path id.
///
/// A missing body id is a malformed request; a differing one conflicts
/// with the targeted record.
pub(crate) fn reconcile_body_id(
    resource: Resource,
    path_id: i64,
    body_id: Option<i64>,
) -> Result<i64, Error> {
    let body_id = body_id.ok_or_else(|| resource.missing_id())?;
    if body_id == path_id {
        Ok(path_id)
    } else {
        Err(resource.mismatched_id())
    }
}
