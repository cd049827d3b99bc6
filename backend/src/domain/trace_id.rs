//! Correlation id carried by each HTTP request.
//!
//! The [`crate::middleware::Trace`] middleware installs a [`TraceId`] in a
//! tokio task-local before the handler runs. Errors raised anywhere inside
//! that task pick it up through [`TraceId::current`].
//!
//! Task locals stay on their task. Work handed to `tokio::spawn` or
//! `spawn_blocking` must be wrapped in [`TraceId::scope`] to keep the id.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response (and optional request) header carrying the correlation id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// UUID v4 correlation id for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id installed for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|active| *active).ok()
    }

    /// Run `fut` with `trace_id` installed as the current id.
    ///
    /// # Examples
    /// ```
    /// use travel_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id = TraceId::generate();
    /// let seen = TraceId::scope(id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        ACTIVE.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(raw.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn nested_scope_shadows_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (seen_inner, seen_outer) = TraceId::scope(outer, async move {
            let seen_inner = TraceId::scope(inner, async { TraceId::current() }).await;
            (seen_inner, TraceId::current())
        })
        .await;
        assert_eq!(seen_inner, Some(inner));
        assert_eq!(seen_outer, Some(outer));
    }

    #[tokio::test]
    async fn spawned_task_does_not_inherit_id() {
        let seen = TraceId::scope(TraceId::generate(), async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("spawned task completes")
        })
        .await;
        assert!(seen.is_none());
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", true)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn parses_hyphenated_uuids(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(raw.parse::<TraceId>().is_ok(), ok);
    }

    #[rstest]
    fn display_is_lowercase_hyphenated() {
        let id: TraceId = "3FA85F64-5717-4562-B3FC-2C963F66AFA6"
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
