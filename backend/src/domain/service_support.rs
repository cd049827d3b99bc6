//! Helpers shared by the resource services.

use std::collections::HashSet;
use std::hash::Hash;

use mockable::Clock;
use serde_json::json;
use tracing::error;

use crate::domain::Error;

/// Fixed detail message for a duplicate customer email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "That email is already used, please use a unique email";
/// Fixed detail message for a duplicate flight number.
pub const DUPLICATE_FLIGHT_NUMBER_MESSAGE: &str =
    "That flight number is already used, please use a unique flight number";

/// Keep the items of `first` whose key also appears in `second`, in `first`'s order.
pub(crate) fn retain_common<T, K>(first: Vec<T>, second: &[T], key: impl Fn(&T) -> K) -> Vec<T>
where
    K: Eq + Hash,
{
    let keep: HashSet<K> = second.iter().map(&key).collect();
    first.into_iter().filter(|item| keep.contains(&key(item))).collect()
}

pub(crate) fn not_found(entity: &str, id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("No {entity} with the id {id} was found!"))
}

pub(crate) fn duplicate_email() -> Error {
    Error::duplicate_key("Unique Email Violation")
        .with_details(json!({ "email": DUPLICATE_EMAIL_MESSAGE }))
}

pub(crate) fn duplicate_flight_number() -> Error {
    Error::duplicate_key("Unique Flight Number Violation")
        .with_details(json!({ "flightNumber": DUPLICATE_FLIGHT_NUMBER_MESSAGE }))
}

/// Wrap an unclassified storage failure, logging the cause.
pub(crate) fn storage_failure(entity: &str, kind: &str, cause: &dyn std::error::Error) -> Error {
    error!(entity, kind, error = %cause, "repository operation failed");
    Error::internal(format!("{entity} repository error: {cause}"))
}

/// Current calendar date in UTC.
pub(crate) fn today(clock: &dyn Clock) -> chrono::NaiveDate {
    clock.utc().date_naive()
}

#[cfg(test)]
pub(crate) mod test_clock {
    //! Fixed clock for deterministic date rules.

    use std::sync::Arc;

    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use mockable::Clock;

    pub(crate) struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    /// Clock frozen at noon on 2024-06-01.
    pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: Utc
                .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        })
    }

    pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }
}
