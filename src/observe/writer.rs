//! # LogWriter — simple observation printer
//!
//! A minimal helper that prints an [`ObservationLog`] to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [init] at=2024-01-01T00:00:00Z
//! [emit-error] rule="orders" msg="connection refused"
//! [validation-error] msg="unable to process events: batch is empty"
//! [end] duration_ms=12
//! ```

use crate::observe::log::ObservationLog;
use crate::observe::record::{Observation, ObservationKind};

/// Observation writer for demos and manual runs.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Prints every record in occurrence order.
    pub fn write(&self, log: &ObservationLog) {
        for obs in log {
            self.write_one(obs);
        }
    }

    fn write_one(&self, o: &Observation) {
        match o.kind {
            ObservationKind::InitFunction => {
                println!("[init] at={}", o.event_time.to_rfc3339());
            }
            ObservationKind::EndFunction => {
                println!("[end] duration_ms={:?}", o.duration_ms);
            }
            ObservationKind::ValidationError => {
                println!("[validation-error] rule={:?} msg={:?}", o.rule, o.message);
            }
            ObservationKind::EmitError => {
                println!("[emit-error] rule={:?} msg={:?}", o.rule, o.message);
            }
            ObservationKind::StackError => {
                println!("[stack-error] msg={:?} stack={:?}", o.message, o.stack);
            }
        }
    }
}
