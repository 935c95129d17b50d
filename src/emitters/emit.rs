//! # Emitter capability trait.
//!
//! [`Emit`] is the seam between the router core and the outside world: a
//! queue, an HTTP sink, anything that can accept a batch of envelopes.
//! Implementations live outside the core and are registered in an
//! [`EmitterSet`](crate::EmitterSet) under the rule names they serve.
//!
//! ## Rules
//! - Ordinary per-event failures are reported through
//!   [`EmitReport::failed_events`], never as `Err`.
//! - `Err` is reserved for catastrophic, batch-wide failure; it poisons the
//!   rule's entire matched subset for the invocation.
//! - The emit future is the only suspension point in the pipeline; no
//!   timeout is applied, so callers needing one must wrap the emitter
//!   themselves.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventrouter::{Emit, EmitError, EmitReport, Envelope};
//!
//! struct Stdout;
//!
//! #[async_trait]
//! impl Emit for Stdout {
//!     async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
//!         for env in &batch {
//!             println!("{}", serde_json::to_string(env).unwrap_or_default());
//!         }
//!         Ok(EmitReport::default())
//!     }
//!
//!     fn name(&self) -> &'static str { "stdout" }
//! }
//! ```

use async_trait::async_trait;

use crate::error::EmitError;
use crate::events::{Envelope, Event};
use crate::observe::Observation;

/// Result of one emission attempt.
///
/// `observe` is merged into the invocation's observation log; `failed_events`
/// (events that did not make it out, tagged by the core with the owning rule
/// name) are merged into the failed-events collection for the dead-letter
/// step.
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Diagnostic records produced by the emitter.
    pub observe: Vec<Observation>,
    /// Events that failed to emit, for dead-letter handling.
    pub failed_events: Vec<Event>,
}

impl EmitReport {
    /// A fully successful report: no observations, no failures.
    pub fn ok() -> Self {
        Self::default()
    }
}

/// # External delivery capability for envelope batches.
///
/// One emitter is registered per rule name; the dispatch engine invokes it
/// with exactly the envelopes mapped from that rule's matched subset, in
/// input order, and awaits the result before moving to the next rule.
#[async_trait]
pub trait Emit: Send + Sync + 'static {
    /// Delivers a batch of envelopes.
    ///
    /// Report per-event failures via [`EmitReport::failed_events`]; return
    /// `Err` only when the whole batch is undeliverable.
    async fn emit(&self, batch: Vec<Envelope>) -> Result<EmitReport, EmitError>;

    /// Returns the emitter name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
