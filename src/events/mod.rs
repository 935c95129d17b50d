//! Event records and the envelope shape delivered to emitters.

mod envelope;
mod event;

pub use envelope::{Envelope, DATA_CONTENT_TYPE, SPEC_VERSION};
pub use event::Event;
