//! # Structured diagnostic records.
//!
//! Every component of the router reports what happened through
//! [`Observation`]s: append-only records accumulated across one invocation
//! and returned to the caller. They are the *only* way failures surface —
//! the router never raises to its caller.
//!
//! [`ObservationKind`] classifies records across three categories:
//! - **Lifecycle**: `InitFunction` / `EndFunction` (the latter carries the
//!   elapsed duration of the invocation)
//! - **Validation**: `ValidationError` (malformed rule, malformed emitter
//!   set, or an empty batch)
//! - **Failure**: `EmitError` (a rule's emit path failed; its matched subset
//!   was poisoned) and `StackError` (something escaped the whole pipeline
//!   and was caught at the top level)
//!
//! ## Example
//! ```rust
//! use eventrouter::{MsgLevel, Observation, ObservationKind};
//!
//! let obs = Observation::new(ObservationKind::EmitError)
//!     .with_message("connection refused")
//!     .with_rule("orders");
//!
//! assert_eq!(obs.kind, ObservationKind::EmitError);
//! assert_eq!(obs.level, MsgLevel::Warning);
//! assert_eq!(obs.rule.as_deref(), Some("orders"));
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Classification of observation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObservationKind {
    /// Invocation entered the handler.
    ///
    /// Sets:
    /// - `event_time`: wall-clock timestamp
    InitFunction,

    /// Invocation left the handler (always recorded, even after a
    /// top-level failure).
    ///
    /// Sets:
    /// - `event_time`: wall-clock timestamp
    /// - `duration_ms`: elapsed time for the whole invocation
    EndFunction,

    /// A rule, the emitter set, or the incoming batch failed validation.
    ///
    /// Sets:
    /// - `message`: structured failure reason
    /// - `rule`: offending rule name, when applicable
    ValidationError,

    /// A rule's map/emit path failed; its whole matched subset was pushed
    /// to the failed-events collection.
    ///
    /// Sets:
    /// - `message`: failure reason
    /// - `stack`: error detail chain, when available
    /// - `rule`: the rule whose processing failed
    EmitError,

    /// An error escaped the dispatch pipeline and was caught at the top
    /// level (including panics inside emitters' own plumbing).
    ///
    /// Sets:
    /// - `message`: failure reason
    /// - `stack`: panic/error detail, when available
    StackError,
}

impl ObservationKind {
    /// Returns the severity this kind is reported at.
    ///
    /// `EmitError` is a warning (the batch survived, one rule was poisoned);
    /// validation and stack errors are errors; lifecycle markers are info.
    pub fn level(self) -> MsgLevel {
        match self {
            ObservationKind::InitFunction | ObservationKind::EndFunction => MsgLevel::Info,
            ObservationKind::EmitError => MsgLevel::Warning,
            ObservationKind::ValidationError | ObservationKind::StackError => MsgLevel::Error,
        }
    }
}

/// Severity of an observation record.
///
/// Callers scan the log for `Error`/`Warning` to decide their own
/// done/fail signaling; the router does not decide it for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MsgLevel {
    Info,
    Warning,
    Error,
}

/// One structured diagnostic record.
///
/// Created with [`Observation::new`] (wall-clock stamped) or
/// [`Observation::at`] (explicit timestamp, for injected clocks), then
/// enriched with `with_*` builders. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Wall-clock timestamp of the occurrence.
    pub event_time: DateTime<Utc>,
    /// Record classification.
    #[serde(rename = "eventType")]
    pub kind: ObservationKind,
    /// Severity level.
    #[serde(rename = "msgLevel")]
    pub level: MsgLevel,
    /// Human-readable reason (validation failures, emit errors, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Arc<str>>,
    /// Error detail chain, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Arc<str>>,
    /// Name of the rule involved, if any.
    #[serde(rename = "eventRouter", skip_serializing_if = "Option::is_none")]
    pub rule: Option<Arc<str>>,
    /// Component that produced the record.
    #[serde(rename = "functionName")]
    pub function_name: &'static str,
    /// Elapsed time in milliseconds (only on `EndFunction`).
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Observation {
    /// Creates a record of the given kind, stamped with the current time.
    ///
    /// The severity is derived from the kind via [`ObservationKind::level`].
    pub fn new(kind: ObservationKind) -> Self {
        Self::at(Utc::now(), kind)
    }

    /// Creates a record with an explicit timestamp.
    pub fn at(event_time: DateTime<Utc>, kind: ObservationKind) -> Self {
        Self {
            event_time,
            kind,
            level: kind.level(),
            message: None,
            stack: None,
            rule: None,
            function_name: "eventrouter",
            duration_ms: None,
        }
    }

    /// Attaches a human-readable message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches an error detail chain.
    #[inline]
    pub fn with_stack(mut self, stack: impl Into<Arc<str>>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attaches the name of the rule involved.
    #[inline]
    pub fn with_rule(mut self, rule: impl Into<Arc<str>>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Overrides the producing component's name.
    #[inline]
    pub fn with_function(mut self, function_name: &'static str) -> Self {
        self.function_name = function_name;
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_duration(mut self, d: Duration) -> Self {
        self.duration_ms = Some(d.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_derived_from_kind() {
        assert_eq!(
            Observation::new(ObservationKind::InitFunction).level,
            MsgLevel::Info
        );
        assert_eq!(
            Observation::new(ObservationKind::EmitError).level,
            MsgLevel::Warning
        );
        assert_eq!(
            Observation::new(ObservationKind::ValidationError).level,
            MsgLevel::Error
        );
        assert_eq!(
            Observation::new(ObservationKind::StackError).level,
            MsgLevel::Error
        );
    }

    #[test]
    fn test_wire_names() {
        let obs = Observation::new(ObservationKind::EmitError)
            .with_message("boom")
            .with_rule("orders")
            .with_duration(Duration::from_millis(42));
        let value = serde_json::to_value(&obs).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["eventType"], "emitError");
        assert_eq!(obj["msgLevel"], "warning");
        assert_eq!(obj["eventRouter"], "orders");
        assert_eq!(obj["functionName"], "eventrouter");
        assert_eq!(obj["duration"], 42);
        assert!(obj.contains_key("eventTime"));
    }
}
