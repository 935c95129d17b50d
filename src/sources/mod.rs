//! Narrow capabilities for the router's environmental touchpoints:
//! wall-clock time, fresh envelope ids, and the last-resort failure dump.
//!
//! All are injected so that tests can pin them; production code uses the
//! defaults ([`SystemClock`], [`UuidSource`], [`StderrWriter`]).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::events::Event;

/// Wall-clock time source for observation timestamps.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of fresh unique envelope ids.
pub trait IdSource: Send + Sync + 'static {
    /// Returns a new unique id. Every envelope gets its own.
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Last-resort sink for events that could not be delivered anywhere.
///
/// Invoked at most once per invocation, with the full irrecoverable set,
/// and only when [`RouterConfig::log_failure`](crate::RouterConfig) is set.
pub trait FailureWriter: Send + Sync + 'static {
    /// Writes the irrecoverable events, verbatim.
    fn write(&self, events: &[Event]);
}

/// Pretty-prints irrecoverable events to stderr as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrWriter;

impl FailureWriter for StderrWriter {
    fn write(&self, events: &[Event]) {
        match serde_json::to_string_pretty(events) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{events:?}"),
        }
    }
}
