//! # Routing rules: a named filter + transform pair.
//!
//! A [`Rule`] decides which events go to which emitter and how they are
//! reshaped. Per rule the dispatch engine runs:
//!
//! ```text
//! events ──filter(evaluation)──► matched ──map(event_map)──► envelopes ──► emitter
//! ```
//!
//! ## Rules
//! - `name` must be unique within the rule set and must have an emitter
//!   registered under it.
//! - `name`, `subject` and `kind` must be non-empty.
//! - `event_map` may fail; any failure poisons the rule's whole matched
//!   subset for the invocation.
//!
//! ## Example
//! ```rust
//! use eventrouter::Rule;
//!
//! let rule = Rule::new(
//!     "orders",
//!     "route",
//!     "event.create.route",
//!     |ev| ev.payload.get("id").is_some(),
//!     |ev| Ok(ev.payload.clone()),
//! );
//! assert_eq!(rule.name(), "orders");
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::error::EmitError;
use crate::events::Event;

/// Predicate deciding whether an event matches a rule.
pub type EvalFn = Arc<dyn Fn(&Event) -> bool + Send + Sync>;

/// Transform producing the envelope `data` payload for a matching event.
pub type MapFn = Arc<dyn Fn(&Event) -> Result<Value, EmitError> + Send + Sync>;

/// A named routing rule: filter predicate plus payload transform.
///
/// `subject` and `kind` are stamped verbatim onto every envelope the rule
/// produces (`kind` is the CloudEvents `type` field).
#[derive(Clone)]
pub struct Rule {
    name: Arc<str>,
    subject: Arc<str>,
    kind: Arc<str>,
    evaluation: EvalFn,
    event_map: MapFn,
}

impl Rule {
    /// Creates a rule from plain closures.
    pub fn new<E, M>(
        name: impl Into<Arc<str>>,
        subject: impl Into<Arc<str>>,
        kind: impl Into<Arc<str>>,
        evaluation: E,
        event_map: M,
    ) -> Self
    where
        E: Fn(&Event) -> bool + Send + Sync + 'static,
        M: Fn(&Event) -> Result<Value, EmitError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            subject: subject.into(),
            kind: kind.into(),
            evaluation: Arc::new(evaluation),
            event_map: Arc::new(event_map),
        }
    }

    /// Returns the rule name (also the emitter lookup key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the envelope subject.
    pub fn subject(&self) -> &Arc<str> {
        &self.subject
    }

    /// Returns the envelope type.
    pub fn kind(&self) -> &Arc<str> {
        &self.kind
    }

    /// Applies the filter predicate to one event.
    pub fn matches(&self, event: &Event) -> bool {
        (self.evaluation)(event)
    }

    /// Applies the payload transform to one event.
    pub fn map(&self, event: &Event) -> Result<Value, EmitError> {
        (self.event_map)(event)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("subject", &self.subject)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
