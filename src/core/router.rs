//! # Top-level handler.
//!
//! [`Router`] wraps validation, dispatch and dead-letter forwarding behind a
//! single entry point, [`Router::handle`], invoked once per batch.
//!
//! ## Flow
//! ```text
//! handle(events)
//!   ├─► push InitFunction
//!   ├─► invalid config? ──► replay validation observations, skip batch
//!   ├─► dispatch(events, rules, emitters)        (panics → StackError)
//!   ├─► forward(failed, dlq, log_failure)        (Err/panic → StackError)
//!   └─► push EndFunction (with elapsed duration; always runs)
//! ```
//!
//! ## Rules
//! - `handle` never returns an error and never panics outward: every
//!   failure is data in the returned [`ObservationLog`].
//! - `InitFunction` / `EndFunction` bracket every invocation, whatever
//!   happens in between.
//! - Callers decide success themselves by scanning the log
//!   ([`has_errors`](ObservationLog::has_errors),
//!   [`has_warnings`](ObservationLog::has_warnings)).
//! - The failed-events accumulator is a local of each call; nothing is
//!   shared across invocations.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;

use crate::config::RouterConfig;
use crate::core::deadletter::forward;
use crate::core::dispatch::{dispatch, panic_message};
use crate::core::validate::ValidationOutcome;
use crate::emitters::EmitterSet;
use crate::events::Event;
use crate::observe::{Observation, ObservationKind, ObservationLog};
use crate::rules::Rule;
use crate::sources::{Clock, FailureWriter, IdSource};

const FN_HANDLER: &str = "eventrouter";

/// Outcome of one invocation: the full observation log plus the events that
/// failed their primary route (and were handed to the dead-letter step).
#[derive(Debug)]
pub struct RouterReport {
    /// Every observation produced during the invocation, in order.
    pub observe: ObservationLog,
    /// Events that failed emission, tagged with the rejecting rule.
    pub failed_events: Vec<Event>,
}

/// Batch event-routing dispatcher.
///
/// Built once via [`Router::builder`] with an immutable, pre-validated
/// configuration; [`handle`](Router::handle) is then called once per batch.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use chrono::Utc;
/// use serde_json::json;
/// use eventrouter::{
///     Emit, EmitError, EmitReport, EmitterSet, Envelope, Event, Router, RouterConfig, Rule,
/// };
///
/// struct Printer;
///
/// #[async_trait]
/// impl Emit for Printer {
///     async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
///         println!("delivering {} envelopes", batch.len());
///         Ok(EmitReport::ok())
///     }
///     fn name(&self) -> &'static str { "printer" }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let router = Router::builder(RouterConfig::default())
///     .with_rule(Rule::new(
///         "testEvent",
///         "route",
///         "event.create.route",
///         |ev| ev.payload.get("id").is_some(),
///         |ev| Ok(ev.payload.clone()),
///     ))
///     .with_emitters(EmitterSet::new().with_emitter("testEvent", Arc::new(Printer)))
///     .build();
///
/// let events = vec![Event::new(Utc::now(), json!({"id": 1}))];
/// let report = router.handle(&events).await;
/// assert!(!report.observe.has_errors());
/// assert!(report.failed_events.is_empty());
/// # }
/// ```
pub struct Router {
    rules: Vec<Rule>,
    emitters: EmitterSet,
    config: RouterConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    failures: Arc<dyn FailureWriter>,
    validation: ValidationOutcome,
}

impl Router {
    /// Starts a [`RouterBuilder`](crate::RouterBuilder).
    pub fn builder(config: RouterConfig) -> crate::core::builder::RouterBuilder {
        crate::core::builder::RouterBuilder::new(config)
    }

    pub(crate) fn from_parts(
        rules: Vec<Rule>,
        emitters: EmitterSet,
        config: RouterConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
        failures: Arc<dyn FailureWriter>,
        validation: ValidationOutcome,
    ) -> Self {
        Self {
            rules,
            emitters,
            config,
            clock,
            ids,
            failures,
            validation,
        }
    }

    /// Returns `true` when the configuration passed validation at build time.
    pub fn is_valid(&self) -> bool {
        self.validation.ok
    }

    /// Processes one batch of events.
    ///
    /// Always returns normally; inspect the report's log for
    /// `error`/`warning` levels to decide done/fail signaling.
    pub async fn handle(&self, events: &[Event]) -> RouterReport {
        let started = Instant::now();
        let mut observe = ObservationLog::new();
        let mut failed_events: Vec<Event> = Vec::new();

        observe.push(
            Observation::at(self.clock.now(), ObservationKind::InitFunction)
                .with_function(FN_HANDLER),
        );

        if !self.validation.ok {
            // Invalid configuration: skip the batch, surface the stored
            // validation records so every invocation explains itself.
            observe.extend(self.validation.observations.iter().cloned());
        } else {
            match AssertUnwindSafe(dispatch(
                events,
                &self.rules,
                &self.emitters,
                self.ids.as_ref(),
                self.clock.as_ref(),
            ))
            .catch_unwind()
            .await
            {
                Ok((obs, failed)) => {
                    observe.extend(obs);
                    failed_events = failed;
                }
                Err(panic) => observe.push(self.stack_error(panic_message(panic), "panic")),
            }

            match AssertUnwindSafe(forward(
                &failed_events,
                self.emitters.dlq(),
                self.config.log_failure,
                self.failures.as_ref(),
            ))
            .catch_unwind()
            .await
            {
                Ok(Ok(obs)) => observe.extend(obs),
                Ok(Err(err)) => {
                    observe.push(self.stack_error(err.as_message(), err.as_label()))
                }
                Err(panic) => observe.push(self.stack_error(panic_message(panic), "panic")),
            }
        }

        observe.push(
            Observation::at(self.clock.now(), ObservationKind::EndFunction)
                .with_duration(started.elapsed())
                .with_function(FN_HANDLER),
        );

        RouterReport {
            observe,
            failed_events,
        }
    }

    fn stack_error(&self, message: String, stack: &'static str) -> Observation {
        Observation::at(self.clock.now(), ObservationKind::StackError)
            .with_message(message)
            .with_stack(stack)
            .with_function(FN_HANDLER)
    }
}
