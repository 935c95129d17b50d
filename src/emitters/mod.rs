//! Emitter capabilities and the typed emitter table.

mod deadletter;
mod emit;
mod set;

pub use deadletter::DeadLetter;
pub use emit::{Emit, EmitReport};
pub use set::EmitterSet;
