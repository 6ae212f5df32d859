//! Request correlation identifier.
//!
//! A [`TraceId`] is bound to a task-local scope for the duration of one
//! request so that errors constructed anywhere below the middleware can pick
//! it up without threading it through every signature.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

tokio::task_local! {
    static CURRENT_TRACE_ID: TraceId;
}

/// Identifier correlating one HTTP request across log lines and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Run `future` with this identifier bound as the current trace id.
    pub async fn scope<F>(self, future: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_TRACE_ID.scope(self, future).await
    }

    /// The identifier bound to the current task scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT_TRACE_ID.try_with(|id| *id).ok()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(value).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_none_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn scope_binds_current_id() {
        let id = TraceId::generate();
        let observed = id.scope(async { TraceId::current() }).await;
        assert_eq!(observed, Some(id));
    }

    #[tokio::test]
    async fn nested_scopes_shadow_and_restore() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (inner_seen, outer_seen) = outer
            .scope(async move {
                let inner_seen = inner.scope(async { TraceId::current() }).await;
                (inner_seen, TraceId::current())
            })
            .await;
        assert_eq!(inner_seen, Some(inner));
        assert_eq!(outer_seen, Some(outer));
    }

    #[test]
    fn parses_and_displays_uuid_text() {
        let text = "1f1a9a5e-62a6-4cbb-9f31-1f5f6f9d4a11";
        let id: TraceId = text.parse().expect("valid UUID");
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn rejects_non_uuid_text() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }
}
