//! # Dead-letter sink capability.
//!
//! [`DeadLetter`] is the fallback route for events that could not be
//! delivered through their primary emitter. Unlike [`Emit`](crate::Emit) it
//! receives the raw failed [`Event`]s (already tagged with the rejecting
//! rule's name), not envelopes.
//!
//! One forward attempt per invocation, no retries, no backoff. Events the
//! sink *also* fails to take are surfaced for caller-side logging.

use async_trait::async_trait;

use crate::emitters::emit::EmitReport;
use crate::error::EmitError;
use crate::events::Event;

/// # Fallback sink for events that failed their primary route.
#[async_trait]
pub trait DeadLetter: Send + Sync + 'static {
    /// Accepts the full failed-events collection of one invocation.
    ///
    /// Events the sink cannot take go in the report's `failed_events`;
    /// `Err` is reserved for the sink being unreachable altogether.
    async fn forward(&self, events: Vec<Event>) -> Result<EmitReport, EmitError>;

    /// Returns the sink name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
