//! # CloudEvents-like output envelope.
//!
//! [`Envelope`] is the shape handed to emitters. Its wire field names are
//! load-bearing for interoperating systems and must not change:
//!
//! ```json
//! {
//!     "specversion": "1.0",
//!     "subject": "route",
//!     "type": "event.create.route",
//!     "datacontenttype": "application/json",
//!     "id": "a234-1234-1234",
//!     "time": "2018-04-05T17:31:00Z",
//!     "data": "{\"id\":1}"
//! }
//! ```
//!
//! `data` is the JSON-*stringified* output of the rule's event map, not a
//! nested object.

use std::sync::Arc;

use chrono::DateTime;
use serde::Serialize;

use crate::events::event::Event;

/// CloudEvents spec version stamped on every envelope.
pub const SPEC_VERSION: &str = "1.0";

/// Content type of the `data` field.
pub const DATA_CONTENT_TYPE: &str = "application/json";

/// Transformed event, ready for delivery to an emitter.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Envelope {
    /// CloudEvents spec version (always `"1.0"`).
    pub specversion: &'static str,
    /// Subject taken from the owning rule.
    pub subject: Arc<str>,
    /// Event type taken from the owning rule.
    #[serde(rename = "type")]
    pub kind: Arc<str>,
    /// Content type of `data` (always `"application/json"`).
    pub datacontenttype: &'static str,
    /// Fresh unique id, one per envelope.
    pub id: String,
    /// RFC 3339 timestamp derived from the source event's own time.
    pub time: String,
    /// JSON string of the rule's event-map output.
    pub data: String,
}

impl Envelope {
    /// Rebuilds an [`Event`] from this envelope, for emitters that report
    /// per-envelope delivery failures back as failed events.
    ///
    /// Degrades rather than fails: an unparseable `time` yields an untimed
    /// event, unparseable `data` is kept as a raw JSON string. The core tags
    /// the result with the owning rule's name afterwards.
    pub fn to_event(&self) -> Event {
        let payload = serde_json::from_str(&self.data)
            .unwrap_or_else(|_| serde_json::Value::String(self.data.clone()));
        match DateTime::parse_from_rfc3339(&self.time) {
            Ok(time) => Event::new(time.with_timezone(&chrono::Utc), payload),
            Err(_) => Event::untimed(payload),
        }
    }
}
