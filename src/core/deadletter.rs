//! # Dead-letter forwarding: the single fallback attempt.
//!
//! After all rules ran, every event in the failed collection gets exactly
//! one re-emission attempt through the registered [`DeadLetter`] sink:
//!
//! ```text
//! failed ──► dlq.forward(all) ──► observe merged
//!                │
//!                ├─ report.failed_events non-empty ──► one dump (if log_failure)
//!                └─ Err / panic ──────────────────────► propagates (StackError upstream)
//!
//! no dlq registered ──► one dump (if log_failure), or silent drop
//! ```
//!
//! No retries, no backoff. The dump — at most one per invocation — goes
//! through the injected [`FailureWriter`] and is the last-resort visibility
//! mechanism for events that could not be delivered anywhere.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::core::dispatch::panic_message;
use crate::emitters::DeadLetter;
use crate::error::EmitError;
use crate::events::Event;
use crate::observe::Observation;
use crate::sources::FailureWriter;

/// Forwards the failed-events collection through the dead-letter sink.
///
/// Returns the observations to merge into the invocation log. An `Err`
/// (including a caught panic inside the sink) is the caller's problem: the
/// handler converts it into a `StackError` record.
pub(crate) async fn forward(
    failed: &[Event],
    dlq: Option<&Arc<dyn DeadLetter>>,
    log_failure: bool,
    failures: &dyn FailureWriter,
) -> Result<Vec<Observation>, EmitError> {
    if failed.is_empty() {
        return Ok(Vec::new());
    }

    let Some(sink) = dlq else {
        if log_failure {
            failures.write(failed);
        }
        return Ok(Vec::new());
    };

    let report = match AssertUnwindSafe(sink.forward(failed.to_vec()))
        .catch_unwind()
        .await
    {
        Ok(result) => result?,
        Err(panic) => {
            return Err(EmitError::Batch {
                error: panic_message(panic),
            })
        }
    };

    // Events the sink took are done; whatever it bounced is irrecoverable.
    if !report.failed_events.is_empty() && log_failure {
        failures.write(&report.failed_events);
    }
    Ok(report.observe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::{
        bouncing_dlq, event_with_id, failing_dlq, CountingWriter, RecordingDlq,
    };

    #[tokio::test]
    async fn test_empty_collection_is_a_noop() {
        let sink = Arc::new(RecordingDlq::default());
        let writer = CountingWriter::default();
        let obs = forward(&[], Some(&(sink.clone() as Arc<dyn DeadLetter>)), true, &writer)
            .await
            .unwrap();
        assert!(obs.is_empty());
        assert!(sink.received().is_empty());
        assert!(writer.dumps().is_empty());
    }

    #[tokio::test]
    async fn test_sink_receives_whole_collection_once() {
        let sink = Arc::new(RecordingDlq::default());
        let writer = CountingWriter::default();
        let failed = vec![
            event_with_id(1).with_route("orders"),
            event_with_id(2).with_route("invoices"),
        ];
        forward(
            &failed,
            Some(&(sink.clone() as Arc<dyn DeadLetter>)),
            true,
            &writer,
        )
        .await
        .unwrap();

        let received = sink.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 2);
        assert_eq!(received[0][0].route.as_deref(), Some("orders"));
        // The sink took everything: nothing reaches the last-resort dump.
        assert!(writer.dumps().is_empty());
    }

    #[tokio::test]
    async fn test_no_sink_dumps_exactly_once() {
        let writer = CountingWriter::default();
        let failed = vec![event_with_id(1), event_with_id(2)];

        let obs = forward(&failed, None, true, &writer).await.unwrap();

        assert!(obs.is_empty());
        let dumps = writer.dumps();
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].len(), 2);
    }

    #[tokio::test]
    async fn test_no_sink_silent_when_logging_disabled() {
        let writer = CountingWriter::default();
        let failed = vec![event_with_id(1)];

        forward(&failed, None, false, &writer).await.unwrap();

        assert!(writer.dumps().is_empty());
    }

    #[tokio::test]
    async fn test_sink_leftovers_dumped_exactly_once() {
        let writer = CountingWriter::default();
        let failed = vec![event_with_id(1), event_with_id(2)];
        let sink = bouncing_dlq();

        forward(&failed, Some(&sink), true, &writer).await.unwrap();

        let dumps = writer.dumps();
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].len(), 2);
    }

    #[tokio::test]
    async fn test_sink_leftovers_dropped_when_logging_disabled() {
        let writer = CountingWriter::default();
        let failed = vec![event_with_id(1)];
        let sink = bouncing_dlq();

        forward(&failed, Some(&sink), false, &writer).await.unwrap();

        assert!(writer.dumps().is_empty());
    }

    #[tokio::test]
    async fn test_sink_error_propagates() {
        let writer = CountingWriter::default();
        let failed = vec![event_with_id(1)];
        let sink = failing_dlq();
        let result = forward(&failed, Some(&sink), false, &writer).await;
        assert!(result.is_err());
    }
}
