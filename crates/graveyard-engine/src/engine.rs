//! Orchestration of one reconciliation pass.

use std::sync::Arc;

use tracing::info;

use crate::directory::Directory;
use crate::error::EngineResult;
use crate::executor::MoveExecutor;
use crate::locator::locate_group;
use crate::notify::{notify_moved, Notifier};
use crate::report::{ReconciliationReport, ReportBuilder};
use crate::resilience::RetryPolicy;
use crate::selector::select_candidates;
use crate::types::MoveResult;

/// Per-invocation configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Name of the holding group that receives closed accounts.
    pub target_group_name: String,
}

impl EngineConfig {
    pub fn new(target_group_name: impl Into<String>) -> Self {
        Self {
            target_group_name: target_group_name.into(),
        }
    }
}

/// One-shot reconciliation engine.
///
/// A single run is one sequential pass: resolve the target group, select
/// candidates, then move each candidate under the retry policy. Two
/// overlapping invocations (closure event and scheduled sweep) are not
/// coordinated by any lock; convergence relies on the selection rule
/// excluding accounts already in the target group, and on the directory
/// move being safe to repeat.
pub struct ReconciliationEngine<D> {
    directory: D,
    config: EngineConfig,
    retry: RetryPolicy,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<D> ReconciliationEngine<D>
where
    D: Directory,
{
    /// Create an engine with the default retry policy and no notifier.
    pub fn new(directory: D, config: EngineConfig) -> Self {
        Self {
            directory,
            config,
            retry: RetryPolicy::default(),
            notifier: None,
        }
    }

    /// Override the retry policy (tests use millisecond delays).
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Attach a notification channel for successful moves.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run one reconciliation pass and return the report.
    ///
    /// The only invocation-fatal error is failing to resolve the target
    /// group (or the root it hangs off); every per-account failure is
    /// contained in the report. The target group id is resolved once and
    /// treated as fixed for the remainder of the run.
    pub async fn run(&self) -> EngineResult<ReconciliationReport> {
        let target = locate_group(&self.directory, &self.config.target_group_name).await?;

        let selection = select_candidates(&self.directory, &target).await?;

        let mut builder = ReportBuilder::new();
        for failure in &selection.lookup_failures {
            builder.record(failure);
        }

        if selection.candidates.is_empty() {
            info!("No closed accounts found to process");
        }

        let executor = MoveExecutor::new(&self.directory, self.retry.clone());
        for candidate in &selection.candidates {
            let outcome = executor.execute(candidate, &target).await;

            if outcome.result == MoveResult::Moved {
                if let Some(notifier) = &self.notifier {
                    notify_moved(notifier.as_ref(), &outcome, &target).await;
                }
            }

            builder.record(&outcome);
        }

        let report = builder.finalize();
        info!(
            total_processed = report.total_processed,
            total_failed = report.total_failed,
            "Reconciliation completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::testing::{InMemoryDirectory, RecordingNotifier};
    use crate::types::AccountStatus;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1))
    }

    fn engine(dir: InMemoryDirectory) -> ReconciliationEngine<InMemoryDirectory> {
        ReconciliationEngine::new(dir, EngineConfig::new("Graveyard"))
            .with_retry_policy(fast_policy())
    }

    /// Tree with a graveyard group, a production group, and the given
    /// suspended accounts under production.
    fn populated(accounts: &[&str]) -> InMemoryDirectory {
        let mut dir = InMemoryDirectory::new();
        let root = dir.root();
        dir.add_group(&root, "grp-grave", "Graveyard");
        let prod = dir.add_group(&root, "grp-prod", "Production");
        for id in accounts {
            dir.add_account(id, id, AccountStatus::Suspended, &prod);
        }
        dir
    }

    #[tokio::test]
    async fn end_to_end_mixed_outcomes_preserve_order() {
        let dir = populated(&["acct-a", "acct-b", "acct-c"]);
        dir.fail_moves(
            "acct-b",
            vec![
                EngineError::throttled("1"),
                EngineError::throttled("2"),
                EngineError::throttled("3"),
            ],
        );

        let report = engine(dir).run().await.unwrap();

        let processed: Vec<&str> = report
            .processed_accounts
            .iter()
            .map(|id| id.as_str())
            .collect();
        let failed: Vec<&str> = report.failed_accounts.iter().map(|id| id.as_str()).collect();
        assert_eq!(processed, ["acct-a", "acct-c"]);
        assert_eq!(failed, ["acct-b"]);
        assert_eq!(report.total_processed, 2);
        assert_eq!(report.total_failed, 1);
    }

    #[tokio::test]
    async fn second_run_over_reconciled_state_is_a_no_op() {
        let dir = populated(&["acct-a", "acct-b"]);
        let engine = engine(dir);

        let first = engine.run().await.unwrap();
        assert_eq!(first.total_processed, 2);

        let second = engine.run().await.unwrap();
        assert_eq!(second.total_processed, 0);
        assert_eq!(second.total_failed, 0);
        assert!(second.processed_accounts.is_empty());
    }

    #[tokio::test]
    async fn missing_target_group_is_invocation_fatal() {
        let mut dir = InMemoryDirectory::new();
        let root = dir.root();
        let prod = dir.add_group(&root, "grp-prod", "Production");
        dir.add_account("acct-a", "acct-a", AccountStatus::Suspended, &prod);

        let engine = ReconciliationEngine::new(dir, EngineConfig::new("Graveyard"))
            .with_retry_policy(fast_policy());
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, EngineError::GroupNotFound { .. }));
        assert_eq!(engine.directory.move_call_count(), 0);
    }

    #[tokio::test]
    async fn empty_organization_produces_empty_report() {
        let dir = populated(&[]);
        let report = engine(dir).run().await.unwrap();
        assert_eq!(report.total_processed, 0);
        assert_eq!(report.total_failed, 0);
    }

    #[tokio::test]
    async fn selection_failures_land_in_the_failed_list() {
        let dir = populated(&["acct-a", "acct-b"]);
        dir.fail_parent_lookup("acct-a", EngineError::directory("lookup exploded"));

        let report = engine(dir).run().await.unwrap();

        assert_eq!(report.total_processed, 1);
        assert_eq!(report.total_failed, 1);
        assert_eq!(report.failed_accounts[0].as_str(), "acct-a");
        assert_eq!(report.processed_accounts[0].as_str(), "acct-b");
    }

    #[tokio::test]
    async fn notifier_fires_once_per_successful_move() {
        let dir = populated(&["acct-a"]);
        let notifier = Arc::new(RecordingNotifier::new());

        let report = engine(dir)
            .with_notifier(notifier.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_processed, 1);
        assert_eq!(notifier.publish_count(), 1);
    }

    #[tokio::test]
    async fn failing_notifier_does_not_alter_the_report() {
        let dir = populated(&["acct-a", "acct-b"]);
        let notifier = Arc::new(RecordingNotifier::failing());

        let report = engine(dir)
            .with_notifier(notifier)
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_processed, 2);
        assert_eq!(report.total_failed, 0);
    }

    #[tokio::test]
    async fn notifier_does_not_fire_for_failures() {
        let dir = populated(&["acct-a"]);
        dir.fail_moves(
            "acct-a",
            vec![EngineError::AccountNotFound {
                account_id: "acct-a".into(),
            }],
        );
        let notifier = Arc::new(RecordingNotifier::new());

        let report = engine(dir)
            .with_notifier(notifier.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_failed, 1);
        assert_eq!(notifier.publish_count(), 0);
    }
}
