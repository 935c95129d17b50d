//! # One-time configuration validation.
//!
//! Runs at [`Router`](crate::Router) construction, never per call: the
//! outcome is stored immutably in the router, and an invalid configuration
//! simply skips every batch (non-fatal by contract).
//!
//! Failures are returned as values ([`ValidationOutcome`]), never thrown.
//! Each failed check produces exactly one [`ObservationKind::ValidationError`]
//! record; per rule the validator short-circuits on the first violation
//! rather than accumulating several.
//!
//! ## Checks
//! - per rule: `name`, `subject`, `kind` non-empty (first violation wins)
//! - across rules: names unique
//! - emitter set: every rule's name resolves to an emitter — looked up by
//!   the *current* rule's name

use std::collections::HashSet;

use crate::emitters::EmitterSet;
use crate::error::RouterError;
use crate::observe::{Observation, ObservationKind};
use crate::rules::Rule;
use crate::sources::Clock;

const FN_RULES: &str = "eventrouter/validate_rules";
const FN_EMITTERS: &str = "eventrouter/validate_emitters";

/// Result of validating a configuration: a success flag plus the
/// observation records describing any failures.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// `true` when every check passed.
    pub ok: bool,
    /// One `ValidationError` record per failed check.
    pub observations: Vec<Observation>,
}

impl ValidationOutcome {
    /// A passing outcome with no observations.
    pub fn pass() -> Self {
        Self {
            ok: true,
            observations: Vec::new(),
        }
    }

    /// A failing outcome carrying one observation.
    pub fn fail(obs: Observation) -> Self {
        Self {
            ok: false,
            observations: vec![obs],
        }
    }

    /// Merges another outcome into this one; the result passes only if
    /// both did.
    pub fn merge(mut self, other: ValidationOutcome) -> Self {
        self.ok = self.ok && other.ok;
        self.observations.extend(other.observations);
        self
    }
}

/// Validates a single rule's shape, short-circuiting on the first violation.
pub fn validate_rule(rule: &Rule, clock: &dyn Clock) -> ValidationOutcome {
    let violation = if rule.name().is_empty() {
        Some(RouterError::EmptyRuleField { field: "name" })
    } else if rule.subject().is_empty() {
        Some(RouterError::EmptyRuleField { field: "subject" })
    } else if rule.kind().is_empty() {
        Some(RouterError::EmptyRuleField { field: "type" })
    } else {
        None
    };

    match violation {
        None => ValidationOutcome::pass(),
        Some(err) => ValidationOutcome::fail(
            Observation::at(clock.now(), ObservationKind::ValidationError)
                .with_message(err.as_message())
                .with_rule(rule.name())
                .with_function(FN_RULES),
        ),
    }
}

/// Validates the whole rule set: per-rule shape plus name uniqueness.
///
/// Rejects the set wholesale on the first failing rule.
pub fn validate_rules(rules: &[Rule], clock: &dyn Clock) -> ValidationOutcome {
    let mut seen = HashSet::new();
    for rule in rules {
        let outcome = validate_rule(rule, clock);
        if !outcome.ok {
            return outcome;
        }
        if !seen.insert(rule.name().to_owned()) {
            let err = RouterError::DuplicateRuleName {
                name: rule.name().to_owned(),
            };
            return ValidationOutcome::fail(
                Observation::at(clock.now(), ObservationKind::ValidationError)
                    .with_message(err.as_message())
                    .with_rule(rule.name())
                    .with_function(FN_RULES),
            );
        }
    }
    ValidationOutcome::pass()
}

/// Validates that every rule has an emitter registered under its own name.
///
/// The lookup key is the current rule's `name`, checked rule by rule;
/// short-circuits on the first missing route.
pub fn validate_emitters(
    emitters: &EmitterSet,
    rules: &[Rule],
    clock: &dyn Clock,
) -> ValidationOutcome {
    for rule in rules {
        if emitters.get(rule.name()).is_none() {
            let err = RouterError::MissingEmitter {
                rule: rule.name().to_owned(),
            };
            return ValidationOutcome::fail(
                Observation::at(clock.now(), ObservationKind::ValidationError)
                    .with_message(err.as_message())
                    .with_rule(rule.name())
                    .with_function(FN_EMITTERS),
            );
        }
    }
    ValidationOutcome::pass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::{nop_emitter, rule_matching_all};
    use crate::events::Event;
    use crate::observe::MsgLevel;
    use crate::sources::SystemClock;

    #[test]
    fn test_valid_rule_passes_without_observations() {
        let rule = rule_matching_all("orders");
        let outcome = validate_rule(&rule, &SystemClock);
        assert!(outcome.ok);
        assert!(outcome.observations.is_empty());
    }

    #[test]
    fn test_empty_name_fails_with_one_observation() {
        let rule = rule_matching_all("");
        let outcome = validate_rule(&rule, &SystemClock);
        assert!(!outcome.ok);
        assert_eq!(outcome.observations.len(), 1);
        let obs = &outcome.observations[0];
        assert_eq!(obs.kind, ObservationKind::ValidationError);
        assert_eq!(obs.level, MsgLevel::Error);
        assert!(obs.message.as_deref().unwrap().contains("'name'"));
    }

    #[test]
    fn test_short_circuits_on_first_violation() {
        // Both name and subject empty: only the name violation is reported.
        let rule = Rule::new(
            "",
            "",
            "event.create.route",
            |_: &Event| true,
            |ev: &Event| Ok(ev.payload.clone()),
        );
        let outcome = validate_rule(&rule, &SystemClock);
        assert_eq!(outcome.observations.len(), 1);
        assert!(outcome.observations[0]
            .message
            .as_deref()
            .unwrap()
            .contains("'name'"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let rules = vec![rule_matching_all("orders"), rule_matching_all("orders")];
        let outcome = validate_rules(&rules, &SystemClock);
        assert!(!outcome.ok);
        assert!(outcome.observations[0]
            .message
            .as_deref()
            .unwrap()
            .contains("duplicate"));
    }

    #[test]
    fn test_missing_emitter_names_the_current_rule() {
        let rules = vec![rule_matching_all("orders"), rule_matching_all("invoices")];
        let emitters = EmitterSet::new().with_emitter("orders", nop_emitter());
        let outcome = validate_emitters(&emitters, &rules, &SystemClock);
        assert!(!outcome.ok);
        assert_eq!(outcome.observations[0].rule.as_deref(), Some("invoices"));
    }

    #[test]
    fn test_idempotent_for_valid_configuration() {
        let rules = vec![rule_matching_all("orders")];
        let emitters = EmitterSet::new().with_emitter("orders", nop_emitter());

        let first = validate_rules(&rules, &SystemClock)
            .merge(validate_emitters(&emitters, &rules, &SystemClock));
        let second = validate_rules(&rules, &SystemClock)
            .merge(validate_emitters(&emitters, &rules, &SystemClock));

        assert!(first.ok && second.ok);
        assert!(first.observations.is_empty());
        assert!(second.observations.is_empty());
    }
}
