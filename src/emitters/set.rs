//! # Emitter table.
//!
//! [`EmitterSet`] maps rule names to [`Emit`] capabilities, plus an optional
//! [`DeadLetter`] slot for the fallback route. It replaces a loosely-typed
//! string-keyed table: the lookup is by the *current rule's* name, and
//! completeness (every rule has an emitter) is checked once at router
//! construction, not per call.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use eventrouter::{Emit, EmitError, EmitReport, EmitterSet, Envelope};
//!
//! struct Nop;
//!
//! #[async_trait]
//! impl Emit for Nop {
//!     async fn emit(&self, _batch: Vec<Envelope>) -> Result<EmitReport, EmitError> {
//!         Ok(EmitReport::ok())
//!     }
//!     fn name(&self) -> &'static str { "nop" }
//! }
//!
//! let set = EmitterSet::new().with_emitter("orders", Arc::new(Nop));
//! assert!(set.get("orders").is_some());
//! assert!(set.dlq().is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::emitters::deadletter::DeadLetter;
use crate::emitters::emit::Emit;

/// Typed mapping from rule name to emitter, with an optional dead-letter slot.
#[derive(Clone, Default)]
pub struct EmitterSet {
    emitters: HashMap<Arc<str>, Arc<dyn Emit>>,
    dlq: Option<Arc<dyn DeadLetter>>,
}

impl EmitterSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an emitter under a rule name, replacing any previous one.
    pub fn with_emitter(mut self, name: impl Into<Arc<str>>, emitter: Arc<dyn Emit>) -> Self {
        self.emitters.insert(name.into(), emitter);
        self
    }

    /// Registers the dead-letter sink.
    pub fn with_dlq(mut self, dlq: Arc<dyn DeadLetter>) -> Self {
        self.dlq = Some(dlq);
        self
    }

    /// Looks up the emitter registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Emit>> {
        self.emitters.get(name)
    }

    /// Returns the dead-letter sink, if one is registered.
    pub fn dlq(&self) -> Option<&Arc<dyn DeadLetter>> {
        self.dlq.as_ref()
    }

    /// Number of registered rule emitters (the dlq slot is not counted).
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Returns `true` if no rule emitters are registered.
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }
}

impl std::fmt::Debug for EmitterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterSet")
            .field("routes", &self.emitters.keys().collect::<Vec<_>>())
            .field("dlq", &self.dlq.is_some())
            .finish()
    }
}
