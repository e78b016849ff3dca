//! What happened to each record, and to the batch as a whole.

use crate::model::ActionKind;
use std::fmt;

/// Errors found in one record by the validator, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}

/// The error taxonomy a failure reason belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing sku or missing/unknown action.
    Structural,
    /// Field-level problem found by the validator.
    Validation,
    /// The catalog is already in (or conflicts with) the requested state.
    Conflict,
    /// The catalog or inventory collaborator failed.
    Collaborator,
}

/// One failure reason, attributable to exactly one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub reason: String,
}

impl Failure {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Result of attempting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Created,
    Updated,
    Enabled,
    Disabled,
    /// Never executed; the reason lists every validation error.
    Skipped(String),
    Failed(Failure),
}

impl ActionOutcome {
    /// The success outcome matching an action kind.
    pub fn succeeded(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Create => ActionOutcome::Created,
            ActionKind::Update => ActionOutcome::Updated,
            ActionKind::Enable => ActionOutcome::Enabled,
            ActionKind::Disable => ActionOutcome::Disabled,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ActionOutcome::Created
                | ActionOutcome::Updated
                | ActionOutcome::Enabled
                | ActionOutcome::Disabled
        )
    }
}

/// The outcome of one input record, tagged with its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub position: usize,
    pub sku: Option<String>,
    pub action: Option<ActionKind>,
    pub outcome: ActionOutcome,
}

/// Aggregated result of one batch run.
///
/// Only the orchestrator constructs it, once, after the last record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    created: usize,
    updated: usize,
    enabled: usize,
    disabled: usize,
    failures: Vec<Failure>,
    outcomes: Vec<RecordOutcome>,
}

impl BatchSummary {
    pub(crate) fn new(
        counts: [usize; 4],
        failures: Vec<Failure>,
        outcomes: Vec<RecordOutcome>,
    ) -> Self {
        let [created, updated, enabled, disabled] = counts;
        Self {
            created,
            updated,
            enabled,
            disabled,
            failures,
            outcomes,
        }
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn updated(&self) -> usize {
        self.updated
    }

    pub fn enabled(&self) -> usize {
        self.enabled
    }

    pub fn disabled(&self) -> usize {
        self.disabled
    }

    /// Failures in input order, one entry per reason.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn failure_reasons(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.reason.as_str())
    }

    /// One outcome per input record, in input order.
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn processed(&self) -> usize {
        self.created + self.updated + self.enabled + self.disabled
    }

    /// True when every counter is zero.
    pub fn nothing_processed(&self) -> bool {
        self.processed() == 0
    }

    /// The operator-facing totals line.
    pub fn totals_line(&self) -> String {
        format!(
            "Total updated: {} | created: {} | disabled: {} | enabled: {}",
            self.updated, self.created, self.disabled, self.enabled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_line_order_matches_operator_report() {
        let summary = BatchSummary::new([2, 1, 0, 3], Vec::new(), Vec::new());
        assert_eq!(
            summary.totals_line(),
            "Total updated: 1 | created: 2 | disabled: 3 | enabled: 0"
        );
        assert_eq!(summary.processed(), 6);
        assert!(!summary.nothing_processed());
    }
}
