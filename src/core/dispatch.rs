//! # Dispatch engine: the per-rule filter → map → emit pipeline.
//!
//! For each rule, in declaration order:
//!
//! ```text
//! events ──filter──► matched ──map──► envelopes ──emit──► EmitReport
//!                       │                                    │
//!                       │ (any Err / panic on this rule)     ├─► observe merged
//!                       ▼                                    ▼
//!               whole subset poisoned ──────────────► failed collection
//! ```
//!
//! ## Rules
//! - A rule whose predicate matches nothing never invokes its emitter.
//! - Envelopes preserve the relative input order of their source events.
//! - Failure is coarse-grained: any error while mapping or emitting a rule's
//!   batch marks the **entire** matched subset as failed for this
//!   invocation, recorded as one `EmitError` observation (warning level).
//! - Failures are isolated per rule; later rules still run.
//! - Panics inside a rule's predicate, map or emitter future are caught and
//!   treated as that rule's failure, same as an `Err`.
//! - Each emitter invocation is awaited before the next rule runs.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::emitters::{EmitReport, EmitterSet};
use crate::error::{EmitError, RouterError};
use crate::events::{Envelope, Event, DATA_CONTENT_TYPE, SPEC_VERSION};
use crate::observe::{Observation, ObservationKind};
use crate::rules::Rule;
use crate::sources::{Clock, IdSource};

const FN_DISPATCH: &str = "eventrouter/dispatch";

/// Runs the whole batch through every rule.
///
/// Returns the observations produced during dispatch and the failed-events
/// collection (each entry tagged with the rule that rejected it), both local
/// to this invocation.
pub(crate) async fn dispatch(
    events: &[Event],
    rules: &[Rule],
    emitters: &EmitterSet,
    ids: &dyn IdSource,
    clock: &dyn Clock,
) -> (Vec<Observation>, Vec<Event>) {
    let mut observe = Vec::new();
    let mut failed: Vec<Event> = Vec::new();

    if events.is_empty() {
        observe.push(
            Observation::at(clock.now(), ObservationKind::ValidationError)
                .with_message(RouterError::EmptyBatch.as_message())
                .with_function(FN_DISPATCH),
        );
        return (observe, failed);
    }

    for rule in rules {
        // A panicking predicate fails its own rule only.
        let matched =
            match std::panic::catch_unwind(AssertUnwindSafe(|| filter_batch(rule, events))) {
                Ok(matched) => matched,
                Err(panic) => {
                    observe.push(emit_error(rule, clock, panic_message(panic), "panic"));
                    continue;
                }
            };
        if matched.is_empty() {
            continue;
        }

        match route(rule, &matched, emitters, ids).await {
            Ok(report) => {
                observe.extend(report.observe);
                failed.extend(tag_failed(report.failed_events, rule));
            }
            Err(err) => {
                observe.push(emit_error(rule, clock, err.as_message(), err.as_label()));
                failed.extend(tag_failed(matched, rule));
            }
        }
    }

    (observe, failed)
}

/// Order-preserving filter of the batch through the rule's predicate.
fn filter_batch(rule: &Rule, events: &[Event]) -> Vec<Event> {
    events.iter().filter(|e| rule.matches(e)).cloned().collect()
}

/// Maps one rule's matched subset and hands it to the rule's emitter.
///
/// Panics inside the map closure or the emitter future are converted into
/// `EmitError::Batch` so the caller can apply the coarse failure policy.
async fn route(
    rule: &Rule,
    matched: &[Event],
    emitters: &EmitterSet,
    ids: &dyn IdSource,
) -> Result<EmitReport, EmitError> {
    // Validation guarantees presence; a gap here still poisons only this rule.
    let emitter = emitters.get(rule.name()).ok_or_else(|| EmitError::Batch {
        error: RouterError::MissingEmitter {
            rule: rule.name().to_owned(),
        }
        .as_message(),
    })?;

    let envelopes = std::panic::catch_unwind(AssertUnwindSafe(|| map_batch(rule, matched, ids)))
        .map_err(|panic| EmitError::Map {
            error: panic_message(panic),
        })??;

    match AssertUnwindSafe(emitter.emit(envelopes)).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(EmitError::Batch {
            error: panic_message(panic),
        }),
    }
}

/// Shapes every matched event into an output envelope, in input order.
fn map_batch(
    rule: &Rule,
    matched: &[Event],
    ids: &dyn IdSource,
) -> Result<Vec<Envelope>, EmitError> {
    matched
        .iter()
        .map(|event| {
            let time = event.event_time.ok_or(EmitError::MissingTime)?;
            let payload = rule.map(event)?;
            let data = serde_json::to_string(&payload).map_err(|e| EmitError::Serialize {
                error: e.to_string(),
            })?;
            Ok(Envelope {
                specversion: SPEC_VERSION,
                subject: rule.subject().clone(),
                kind: rule.kind().clone(),
                datacontenttype: DATA_CONTENT_TYPE,
                id: ids.next_id(),
                time: time.to_rfc3339(),
                data,
            })
        })
        .collect()
}

/// Stamps failed events with the rejecting rule's name.
///
/// An existing tag (set by an emitter that knows better) is kept.
fn tag_failed(events: Vec<Event>, rule: &Rule) -> Vec<Event> {
    events
        .into_iter()
        .map(|e| {
            if e.route.is_some() {
                e
            } else {
                e.with_route(rule.name())
            }
        })
        .collect()
}

fn emit_error(rule: &Rule, clock: &dyn Clock, message: String, stack: &'static str) -> Observation {
    Observation::at(clock.now(), ObservationKind::EmitError)
        .with_message(message)
        .with_stack(stack)
        .with_rule(rule.name())
        .with_function(FN_DISPATCH)
}

/// Best-effort extraction of a panic payload's message.
pub(crate) fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_owned()
    }
}
