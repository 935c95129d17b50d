//! Failure values for the two places things go wrong: configuration and
//! delivery.
//!
//! [`RouterError`] carries the structured reasons a configuration fails
//! validation; [`EmitError`] covers failures while mapping events or emitting
//! a batch. Neither ever escapes [`Router::handle`](crate::Router::handle) as
//! an `Err`: both end up as observation records in the returned log, which
//! is why each exposes a stable snake_case label (`as_label`) alongside its
//! display message (`as_message`).

use thiserror::Error;

/// # Reasons a router configuration is rejected.
///
/// Produced by the rule and emitter-set validators. These are carried inside
/// validation observations rather than returned as `Err`: an invalid
/// configuration is non-fatal, it just skips every batch.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A rule field that must be non-empty text is empty.
    #[error("rule validation failed: field '{field}' is empty")]
    EmptyRuleField {
        /// Name of the offending field (`name`, `subject` or `type`).
        field: &'static str,
    },

    /// Two rules share the same name.
    #[error("rule validation failed: duplicate rule name '{name}'")]
    DuplicateRuleName {
        /// The duplicated rule name.
        name: String,
    },

    /// A rule has no emitter registered under its name.
    #[error("there is no valid emitter defined for route '{rule}'")]
    MissingEmitter {
        /// Name of the rule without an emitter.
        rule: String,
    },

    /// The incoming batch is empty or absent.
    #[error("unable to process events: batch is empty")]
    EmptyBatch,
}

impl RouterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventrouter::RouterError;
    ///
    /// let err = RouterError::EmptyBatch;
    /// assert_eq!(err.as_label(), "empty_batch");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RouterError::EmptyRuleField { .. } => "empty_rule_field",
            RouterError::DuplicateRuleName { .. } => "duplicate_rule_name",
            RouterError::MissingEmitter { .. } => "missing_emitter",
            RouterError::EmptyBatch => "empty_batch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Failures raised while transforming or emitting events.
///
/// Returned by [`Emit::emit`](crate::Emit::emit) for catastrophic, batch-wide
/// failures (ordinary per-event failures belong in
/// [`EmitReport::failed_events`](crate::EmitReport)), and produced internally
/// when an event cannot be shaped into an envelope.
///
/// Any `EmitError` during a rule's processing poisons that rule's whole
/// matched subset for the invocation.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    /// The emitter could not deliver the batch at all.
    #[error("emit failed: {error}")]
    Batch {
        /// The underlying error message.
        error: String,
    },

    /// The rule's event map rejected an event.
    #[error("event map failed: {error}")]
    Map {
        /// The underlying error message.
        error: String,
    },

    /// An event carries no timestamp to derive the envelope `time` from.
    #[error("event has no timestamp; cannot derive envelope time")]
    MissingTime,

    /// The mapped payload could not be serialized to JSON.
    #[error("payload serialization failed: {error}")]
    Serialize {
        /// The underlying error message.
        error: String,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventrouter::EmitError;
    ///
    /// let err = EmitError::Batch { error: "boom".into() };
    /// assert_eq!(err.as_label(), "emit_batch_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Batch { .. } => "emit_batch_failed",
            EmitError::Map { .. } => "event_map_failed",
            EmitError::MissingTime => "event_time_missing",
            EmitError::Serialize { .. } => "payload_serialize_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}
