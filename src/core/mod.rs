//! Core pipeline: validation, dispatch, dead-letter forwarding, and the
//! top-level handler.

mod builder;
mod deadletter;
mod dispatch;
mod router;
mod validate;

pub use builder::RouterBuilder;
pub use router::{Router, RouterReport};
pub use validate::{validate_emitters, validate_rule, validate_rules, ValidationOutcome};

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for the core tests: canned rules, events, and
    //! emitters with scripted behavior.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;

    use crate::emitters::{DeadLetter, Emit, EmitReport};
    use crate::error::EmitError;
    use crate::events::{Envelope, Event};
    use crate::rules::Rule;
    use crate::sources::{FailureWriter, IdSource};

    /// Deterministic id source: `id-0`, `id-1`, ...
    #[derive(Default)]
    pub struct FixedIds {
        counter: AtomicUsize,
    }

    impl IdSource for FixedIds {
        fn next_id(&self) -> String {
            format!("id-{}", self.counter.fetch_add(1, Ordering::Relaxed))
        }
    }

    /// Remembers every batch handed to the last-resort dump.
    #[derive(Default)]
    pub struct CountingWriter {
        dumps: Mutex<Vec<Vec<Event>>>,
    }

    impl CountingWriter {
        pub fn dumps(&self) -> Vec<Vec<Event>> {
            self.dumps.lock().unwrap().clone()
        }
    }

    impl FailureWriter for CountingWriter {
        fn write(&self, events: &[Event]) {
            self.dumps.lock().unwrap().push(events.to_vec());
        }
    }

    pub fn event_with_id(id: i64) -> Event {
        Event::new(Utc::now(), json!({ "id": id }))
    }

    pub fn rule_matching_all(name: &str) -> Rule {
        Rule::new(
            name,
            "route",
            "event.create.route",
            |_: &Event| true,
            |ev: &Event| Ok(ev.payload.clone()),
        )
    }

    pub fn rule_matching_id(name: &str) -> Rule {
        Rule::new(
            name,
            "route",
            "event.create.route",
            |ev: &Event| ev.payload.get("id").is_some(),
            |ev: &Event| Ok(ev.payload.clone()),
        )
    }

    /// Accepts every batch and remembers it.
    #[derive(Default)]
    pub struct RecordingEmitter {
        batches: Mutex<Vec<Vec<Envelope>>>,
    }

    impl RecordingEmitter {
        pub fn batches(&self) -> Vec<Vec<Envelope>> {
            self.batches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Emit for RecordingEmitter {
        async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
            self.batches.lock().unwrap().push(batch);
            Ok(EmitReport::ok())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    pub fn nop_emitter() -> Arc<dyn Emit> {
        Arc::new(RecordingEmitter::default())
    }

    /// Reports every envelope as a failed event (ordinary per-event failure).
    struct RejectingEmitter;

    #[async_trait]
    impl Emit for RejectingEmitter {
        async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
            Ok(EmitReport {
                observe: Vec::new(),
                failed_events: batch.iter().map(Envelope::to_event).collect(),
            })
        }

        fn name(&self) -> &'static str {
            "rejecting"
        }
    }

    pub fn rejecting_emitter() -> Arc<dyn Emit> {
        Arc::new(RejectingEmitter)
    }

    /// Fails catastrophically on every batch.
    struct FailingEmitter;

    #[async_trait]
    impl Emit for FailingEmitter {
        async fn emit(&self, _batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
            Err(EmitError::Batch {
                error: "connection refused".into(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    pub fn failing_emitter() -> Arc<dyn Emit> {
        Arc::new(FailingEmitter)
    }

    /// Panics on every batch.
    struct PanickingEmitter;

    #[async_trait]
    impl Emit for PanickingEmitter {
        async fn emit(&self, _batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
            panic!("emitter exploded");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    pub fn panicking_emitter() -> Arc<dyn Emit> {
        Arc::new(PanickingEmitter)
    }

    /// Dead-letter sink that accepts everything and remembers it.
    #[derive(Default)]
    pub struct RecordingDlq {
        received: Mutex<Vec<Vec<Event>>>,
    }

    impl RecordingDlq {
        pub fn received(&self) -> Vec<Vec<Event>> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DeadLetter for RecordingDlq {
        async fn forward(&self, events: Vec<Event>) -> Result<EmitReport, EmitError> {
            self.received.lock().unwrap().push(events);
            Ok(EmitReport::ok())
        }

        fn name(&self) -> &'static str {
            "recording-dlq"
        }
    }

    /// Dead-letter sink that bounces everything back as still failed.
    struct BouncingDlq;

    #[async_trait]
    impl DeadLetter for BouncingDlq {
        async fn forward(&self, events: Vec<Event>) -> Result<EmitReport, EmitError> {
            Ok(EmitReport {
                observe: Vec::new(),
                failed_events: events,
            })
        }

        fn name(&self) -> &'static str {
            "bouncing-dlq"
        }
    }

    pub fn bouncing_dlq() -> Arc<dyn DeadLetter> {
        Arc::new(BouncingDlq)
    }

    /// Dead-letter sink that is unreachable.
    struct FailingDlq;

    #[async_trait]
    impl DeadLetter for FailingDlq {
        async fn forward(&self, _events: Vec<Event>) -> Result<EmitReport, EmitError> {
            Err(EmitError::Batch {
                error: "dlq unreachable".into(),
            })
        }

        fn name(&self) -> &'static str {
            "failing-dlq"
        }
    }

    pub fn failing_dlq() -> Arc<dyn DeadLetter> {
        Arc::new(FailingDlq)
    }
}
