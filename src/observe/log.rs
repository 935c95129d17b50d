//! # Append-only observation log.
//!
//! [`ObservationLog`] accumulates every record produced during one
//! invocation, in occurrence order. The router returns it to the caller,
//! who scans severities ([`has_errors`](ObservationLog::has_errors),
//! [`has_warnings`](ObservationLog::has_warnings)) to decide their own
//! done/fail signaling.

use serde::Serialize;

use crate::observe::record::{MsgLevel, Observation};

/// Ordered, append-only sequence of observation records.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ObservationLog {
    records: Vec<Observation>,
}

impl ObservationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record.
    pub fn push(&mut self, obs: Observation) {
        self.records.push(obs);
    }

    /// Appends every record of another sequence, preserving order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = Observation>) {
        self.records.extend(records);
    }

    /// Returns `true` if any record was logged at [`MsgLevel::Error`].
    pub fn has_errors(&self) -> bool {
        self.records.iter().any(|o| o.level == MsgLevel::Error)
    }

    /// Returns `true` if any record was logged at [`MsgLevel::Warning`].
    pub fn has_warnings(&self) -> bool {
        self.records.iter().any(|o| o.level == MsgLevel::Warning)
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records were logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.records.iter()
    }

    /// Consumes the log, yielding the underlying records.
    pub fn into_vec(self) -> Vec<Observation> {
        self.records
    }
}

impl IntoIterator for ObservationLog {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObservationLog {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::record::ObservationKind;

    #[test]
    fn test_empty_log_is_clean() {
        let log = ObservationLog::new();
        assert!(log.is_empty());
        assert!(!log.has_errors());
        assert!(!log.has_warnings());
    }

    #[test]
    fn test_matches_on_level_not_kind() {
        // EmitError is a *warning*, despite its name.
        let mut log = ObservationLog::new();
        log.push(Observation::new(ObservationKind::EmitError));
        assert!(log.has_warnings());
        assert!(!log.has_errors());

        log.push(Observation::new(ObservationKind::ValidationError));
        assert!(log.has_errors());
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut log = ObservationLog::new();
        log.push(Observation::new(ObservationKind::InitFunction));
        log.extend(vec![
            Observation::new(ObservationKind::EmitError),
            Observation::new(ObservationKind::EndFunction),
        ]);
        let kinds: Vec<_> = log.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ObservationKind::InitFunction,
                ObservationKind::EmitError,
                ObservationKind::EndFunction,
            ]
        );
    }
}
