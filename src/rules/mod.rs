//! Routing rules.

mod rule;

pub use rule::{EvalFn, MapFn, Rule};
