//! # Incoming event record.
//!
//! [`Event`] is the unit the router filters and transforms. The core reads
//! exactly two things from it: the timestamp (to derive the envelope `time`)
//! and, through the rule's predicate/map closures, the opaque JSON payload.
//!
//! The only mutation the core ever performs is tagging: when an event fails
//! emission it is stamped with the name of the rule that rejected it
//! ([`Event::with_route`]), so the dead-letter sink can trace where it came
//! from.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An application-defined record to be routed.
///
/// The payload is opaque to the core; rule predicates and event maps are the
/// only readers. `event_time` is required to build an output envelope — an
/// event without one fails mapping for the rule that matched it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Timestamp the envelope `time` field is derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,

    /// Opaque application payload.
    pub payload: Value,

    /// Name of the rule that failed to emit this event, if any.
    ///
    /// Set only on the dead-letter path; `None` for live events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Arc<str>>,
}

impl Event {
    /// Creates an event with a timestamp and payload.
    pub fn new(event_time: DateTime<Utc>, payload: Value) -> Self {
        Self {
            event_time: Some(event_time),
            payload,
            route: None,
        }
    }

    /// Creates an event without a timestamp.
    ///
    /// Such an event can still be filtered, but mapping it into an envelope
    /// fails with [`EmitError::MissingTime`](crate::EmitError::MissingTime).
    pub fn untimed(payload: Value) -> Self {
        Self {
            event_time: None,
            payload,
            route: None,
        }
    }

    /// Tags the event with the rule that rejected it.
    #[inline]
    pub fn with_route(mut self, route: impl Into<Arc<str>>) -> Self {
        self.route = Some(route.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_tag_skipped_when_absent() {
        let ev = Event::new(Utc::now(), json!({"id": 1}));
        let text = serde_json::to_string(&ev).unwrap();
        assert!(!text.contains("route"));
    }

    #[test]
    fn test_route_tag_serialized_when_set() {
        let ev = Event::new(Utc::now(), json!({"id": 1})).with_route("orders");
        let text = serde_json::to_string(&ev).unwrap();
        assert!(text.contains("\"route\":\"orders\""));
    }
}
