//! # Router builder.
//!
//! [`RouterBuilder`] assembles a [`Router`] from rules, emitters and
//! configuration, and runs both validators exactly once in
//! [`build`](RouterBuilder::build). The outcome is stored immutably in the
//! router: no validation work, and no validation state, is shared across
//! invocations.
//!
//! An invalid configuration still builds — by contract it is non-fatal, the
//! router just skips every batch and replays the validation observations on
//! each call.

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::core::router::Router;
use crate::core::validate::{validate_emitters, validate_rules};
use crate::emitters::EmitterSet;
use crate::rules::Rule;
use crate::sources::{Clock, FailureWriter, IdSource, StderrWriter, SystemClock, UuidSource};

/// Builder for [`Router`].
///
/// ## Example
/// ```rust
/// use eventrouter::{EmitterSet, Router, RouterConfig};
///
/// let router = Router::builder(RouterConfig::default())
///     .with_rules(vec![])
///     .with_emitters(EmitterSet::new())
///     .build();
/// assert!(router.is_valid());
/// ```
pub struct RouterBuilder {
    config: RouterConfig,
    rules: Vec<Rule>,
    emitters: EmitterSet,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    failures: Arc<dyn FailureWriter>,
}

impl RouterBuilder {
    /// Starts a builder with the given configuration and the default
    /// wall-clock / UUID / stderr sources.
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
            emitters: EmitterSet::new(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidSource),
            failures: Arc::new(StderrWriter),
        }
    }

    /// Sets the whole rule set, replacing any previous rules.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Appends one rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the emitter table.
    pub fn with_emitters(mut self, emitters: EmitterSet) -> Self {
        self.emitters = emitters;
        self
    }

    /// Overrides the wall-clock source (tests, replay).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the envelope id source (tests, deterministic ids).
    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Overrides the last-resort failure writer (tests, custom sinks).
    pub fn with_failure_writer(mut self, failures: Arc<dyn FailureWriter>) -> Self {
        self.failures = failures;
        self
    }

    /// Validates the configuration once and produces the router.
    ///
    /// Both validators run even if the first fails, so the stored outcome
    /// carries every top-level reason.
    pub fn build(self) -> Router {
        let validation = validate_rules(&self.rules, self.clock.as_ref()).merge(
            validate_emitters(&self.emitters, &self.rules, self.clock.as_ref()),
        );
        Router::from_parts(
            self.rules,
            self.emitters,
            self.config,
            self.clock,
            self.ids,
            self.failures,
            validation,
        )
    }
}
