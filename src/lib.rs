//! # eventrouter
//!
//! **eventrouter** is a batch event-routing dispatcher for Rust.
//!
//! Given a batch of incoming events, a set of named routing rules and a set
//! of named emitters, it filters events per rule, transforms matches into a
//! CloudEvents-like envelope, hands them to the rule's emitter, and collects
//! everything that failed emission into a dead-letter path. It is invoked
//! once per batch — a single handler call, not a long-lived server.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!              ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!              │     Rule     │  │     Rule     │  │     Rule     │
//!              │ (filter+map) │  │ (filter+map) │  │ (filter+map) │
//!              └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!                     ▼                 ▼                 ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  Router (validated once at build time)                             │
//! │  - dispatch: per rule, filter batch → map to envelopes → emit      │
//! │  - merge each EmitReport into the ObservationLog / failed set      │
//! │  - forward failed events through the DeadLetter sink (one attempt) │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!   ┌─────────┐        ┌─────────┐        ┌─────────┐     ┌─────────┐
//!   │ Emitter │        │ Emitter │        │ Emitter │     │   DLQ   │
//!   │ (yours) │        │ (yours) │        │ (yours) │     │ (yours) │
//!   └─────────┘        └─────────┘        └─────────┘     └─────────┘
//! ```
//!
//! ### Invocation lifecycle
//! ```text
//! Router::builder(cfg) ──► validate rules + emitter table (once) ──► Router
//!
//! router.handle(events).await:
//!   ├─► InitFunction observation
//!   ├─► invalid config? replay validation errors, skip the batch
//!   ├─► per rule (declaration order):
//!   │     ├─ matched = events.filter(rule.evaluation)
//!   │     ├─ empty? skip rule (emitter never invoked)
//!   │     ├─ envelopes = matched.map(rule.event_map)  (fresh id each)
//!   │     ├─ emitter.emit(envelopes).await
//!   │     └─ Err/panic ⇒ one EmitError observation,
//!   │        whole matched subset ⇒ failed collection (tagged with rule)
//!   ├─► failed events? one forward attempt through the dlq sink;
//!   │   leftovers dumped via the failure writer (gated by log_failure)
//!   └─► EndFunction observation with elapsed duration (always)
//! ```
//!
//! ## Failure contract
//! [`Router::handle`] never returns an error and never panics outward. Every
//! outcome is data in the returned [`RouterReport`]: an [`ObservationLog`]
//! the caller scans for `error`/`warning` levels, plus the failed-events
//! collection. A failing rule poisons only its own matched subset; the other
//! rules still run.
//!
//! ## Features
//! | Area            | Description                                           | Key types / traits             |
//! |-----------------|-------------------------------------------------------|--------------------------------|
//! | **Rules**       | Named filter + transform pairs.                       | [`Rule`]                       |
//! | **Emitters**    | External delivery capabilities, one per rule name.    | [`Emit`], [`EmitterSet`]       |
//! | **Dead-letter** | Single fallback attempt for failed events.            | [`DeadLetter`]                 |
//! | **Observability**| Append-only diagnostic records returned per call.    | [`Observation`], [`ObservationLog`] |
//! | **Errors**      | Typed failures, surfaced only as observations.        | [`RouterError`], [`EmitError`] |
//! | **Sources**     | Injectable wall-clock and envelope-id capabilities.   | [`Clock`], [`IdSource`]        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use chrono::Utc;
//! use serde_json::json;
//! use eventrouter::{
//!     Emit, EmitError, EmitReport, EmitterSet, Envelope, Event, Router, RouterConfig, Rule,
//! };
//!
//! struct QueueSink;
//!
//! #[async_trait]
//! impl Emit for QueueSink {
//!     async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
//!         // deliver to a queue / HTTP endpoint; report per-event failures
//!         // through EmitReport::failed_events, never as Err.
//!         let _ = batch;
//!         Ok(EmitReport::ok())
//!     }
//!     fn name(&self) -> &'static str { "queue" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let router = Router::builder(RouterConfig::default())
//!         .with_rule(Rule::new(
//!             "testEvent",
//!             "route",
//!             "event.create.route",
//!             |ev| ev.payload.get("id").is_some(),
//!             |ev| Ok(ev.payload.clone()),
//!         ))
//!         .with_emitters(EmitterSet::new().with_emitter("testEvent", Arc::new(QueueSink)))
//!         .build();
//!
//!     let events = vec![Event::new(Utc::now(), json!({ "id": 1 }))];
//!     let report = router.handle(&events).await;
//!
//!     assert!(!report.observe.has_errors());
//!     assert!(report.failed_events.is_empty());
//! }
//! ```

mod config;
mod core;
mod emitters;
mod error;
mod events;
mod observe;
mod rules;
mod sources;

// ---- Public re-exports ----

pub use config::RouterConfig;
pub use crate::core::{
    validate_emitters, validate_rule, validate_rules, Router, RouterBuilder, RouterReport,
    ValidationOutcome,
};
pub use emitters::{DeadLetter, Emit, EmitReport, EmitterSet};
pub use error::{EmitError, RouterError};
pub use events::{Envelope, Event, DATA_CONTENT_TYPE, SPEC_VERSION};
pub use observe::{MsgLevel, Observation, ObservationKind, ObservationLog};
pub use rules::{EvalFn, MapFn, Rule};
pub use sources::{Clock, FailureWriter, IdSource, StderrWriter, SystemClock, UuidSource};

// Optional: expose a simple built-in observation printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observe::LogWriter;
