//! Outcome aggregation into the invocation report.

use serde::{Deserialize, Serialize};

use crate::ids::AccountId;
use crate::types::{MoveOutcome, MoveResult};

/// Final report for one reconciliation pass.
///
/// Field names are the invocation output contract. Skipped accounts
/// appear in neither list; they are only visible in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub processed_accounts: Vec<AccountId>,
    pub failed_accounts: Vec<AccountId>,
    pub total_processed: usize,
    pub total_failed: usize,
}

/// Accumulates per-account outcomes in processing order.
///
/// Holds no cross-invocation state; one builder lives and dies with one
/// run.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    processed: Vec<AccountId>,
    failed: Vec<AccountId>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the running report.
    pub fn record(&mut self, outcome: &MoveOutcome) {
        match outcome.result {
            MoveResult::Moved => self.processed.push(outcome.account_id.clone()),
            MoveResult::Failed => self.failed.push(outcome.account_id.clone()),
            MoveResult::Skipped => {}
        }
    }

    /// Finalize into the immutable report snapshot.
    pub fn finalize(self) -> ReconciliationReport {
        ReconciliationReport {
            total_processed: self.processed.len(),
            total_failed: self.failed.len(),
            processed_accounts: self.processed,
            failed_accounts: self.failed,
        }
    }
}
