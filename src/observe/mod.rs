//! Observation records, the append-only log, and the optional printer.

mod log;
mod record;

pub use log::ObservationLog;
pub use record::{MsgLevel, Observation, ObservationKind};

#[cfg(feature = "logging")]
mod writer;
#[cfg(feature = "logging")]
pub use writer::LogWriter;
