//! Runs a batch of feed records, strictly in input order.
//!
//! One [`Orchestrator`] may serve many runs: counters and failures live in a
//! per-run tally, so runs never bleed into each other. Records are processed
//! one at a time; the next record is not looked at until the previous one's
//! collaborator calls have all completed.

use crate::config::{PolicyConfig, SyncConfig};
use crate::engine::validator::MISSING_SKU;
use crate::engine::{Catalog, Executor, Inventory, OutputSink, Validator};
use crate::model::{
    ActionKind, ActionOutcome, BatchSummary, Failure, FailureKind, ProductRecord, RecordOutcome,
};
use tracing::{debug, info, info_span, Instrument};

pub struct Orchestrator<C, I> {
    validator: Validator,
    executor: Executor<C, I>,
    policy: PolicyConfig,
}

/// Counters and failures of a single run.
#[derive(Default)]
struct Tally {
    counts: [usize; 4],
    failures: Vec<Failure>,
    outcomes: Vec<RecordOutcome>,
}

impl Tally {
    fn record(
        &mut self,
        position: usize,
        record: &ProductRecord,
        action: Option<ActionKind>,
        outcome: ActionOutcome,
        failures: Vec<Failure>,
    ) {
        let slot = match outcome {
            ActionOutcome::Created => Some(0),
            ActionOutcome::Updated => Some(1),
            ActionOutcome::Enabled => Some(2),
            ActionOutcome::Disabled => Some(3),
            ActionOutcome::Skipped(_) | ActionOutcome::Failed(_) => None,
        };
        if let Some(slot) = slot {
            self.counts[slot] += 1;
        }
        self.failures.extend(failures);
        self.outcomes.push(RecordOutcome {
            position,
            sku: record.sku().map(str::to_string),
            action,
            outcome,
        });
    }

    fn finish(self) -> BatchSummary {
        BatchSummary::new(self.counts, self.failures, self.outcomes)
    }
}

impl<C: Catalog, I: Inventory> Orchestrator<C, I> {
    pub fn new(catalog: C, inventory: I, config: &SyncConfig) -> Self {
        Self {
            validator: Validator::new(config.validation.clone()),
            executor: Executor::new(catalog, inventory, config),
            policy: config.policy.clone(),
        }
    }

    /// Processes every record and reports the batch to `sink`.
    pub async fn run(&self, records: &[ProductRecord], sink: &dyn OutputSink) -> BatchSummary {
        info!(records = records.len(), "Batch started");
        let mut tally = Tally::default();

        for (position, record) in records.iter().enumerate() {
            let span = info_span!(
                "record",
                position,
                sku = record.sku().unwrap_or("-"),
                action = record.declared_action()
            );
            let (action, outcome, failures) = self.process(record, sink).instrument(span).await;
            tally.record(position, record, action, outcome, failures);
        }

        let summary = tally.finish();
        report(&summary, sink);
        info!(
            created = summary.created(),
            updated = summary.updated(),
            enabled = summary.enabled(),
            disabled = summary.disabled(),
            failures = summary.failures().len(),
            "Batch finished"
        );
        summary
    }

    async fn process(
        &self,
        record: &ProductRecord,
        sink: &dyn OutputSink,
    ) -> (Option<ActionKind>, ActionOutcome, Vec<Failure>) {
        let Some(sku) = record.sku() else {
            let failure = Failure::new(FailureKind::Structural, MISSING_SKU);
            return (None, ActionOutcome::Failed(failure.clone()), vec![failure]);
        };

        let declared = record.declared_action();
        let validation = self.validator.validate(record, Some(declared));
        // A record that could not be read has no trustworthy action to attempt.
        let action = match record.malformed {
            Some(_) => None,
            None => ActionKind::parse(declared),
        };

        let attempt = match action {
            Some(kind) if validation.is_ok() => Some(kind),
            Some(kind) if kind.is_status_change() && self.policy.always_attempt_status_changes => {
                debug!(errors = ?validation.errors, "Attempting status change despite validation errors");
                Some(kind)
            }
            _ => None,
        };

        let Some(kind) = attempt else {
            let failure_kind = if action.is_some() {
                FailureKind::Validation
            } else {
                FailureKind::Structural
            };
            debug!(errors = validation.errors.len(), "Record skipped");
            let reason = validation.errors.join("; ");
            let failures = validation
                .errors
                .into_iter()
                .map(|error| Failure::new(failure_kind, error))
                .collect();
            return (action, ActionOutcome::Skipped(reason), failures);
        };

        let outcome = match self.executor.execute(kind, record, sink).await {
            ActionOutcome::Failed(failure) if failure.reason.trim().is_empty() => {
                ActionOutcome::Failed(Failure::new(
                    failure.kind,
                    format!(
                        "Product with SKU '{}' could not be {}. Unknown reason.",
                        sku,
                        kind.verb()
                    ),
                ))
            }
            outcome => outcome,
        };
        let failures = match &outcome {
            ActionOutcome::Failed(failure) => vec![failure.clone()],
            _ => Vec::new(),
        };
        (Some(kind), outcome, failures)
    }
}

/// Writes the end-of-batch report.
fn report(summary: &BatchSummary, sink: &dyn OutputSink) {
    if summary.nothing_processed() {
        sink.comment("No records were processed.");
        if !summary.failures().is_empty() {
            sink.comment("Reasons:");
            for reason in summary.failure_reasons() {
                sink.comment(reason);
            }
        }
    } else {
        sink.info(&summary.totals_line());
    }
}
