//! Candidate selection.
//!
//! Scans the full account listing and decides which closed accounts need
//! a move. Selection is re-derived from scratch every invocation; the
//! idempotent exclusion rule (already-in-target accounts are dropped
//! entirely) is what lets overlapping invocations converge without a
//! lock.

use tracing::{debug, error, info};

use crate::directory::Directory;
use crate::error::EngineResult;
use crate::ids::GroupId;
use crate::types::{Candidate, MoveOutcome};

/// Result of a selection scan.
///
/// Both sequences preserve the directory's listing order.
#[derive(Debug)]
pub struct Selection {
    /// Closed accounts that are not yet in the target group.
    pub candidates: Vec<Candidate>,
    /// Accounts whose parent lookup failed. These are recorded as
    /// failures with zero attempts; they never reach the move executor.
    pub lookup_failures: Vec<MoveOutcome>,
}

/// Scan all accounts and select those needing a move into `target`.
///
/// An account already sitting in the target group is excluded from the
/// candidate list entirely (logged for observability, no outcome
/// created) - no action was ever needed, so re-running over a fully
/// reconciled state selects nothing. A per-account parent-lookup failure
/// is isolated into `lookup_failures` and does not abort the scan; only
/// a failure of the full account listing aborts the invocation.
pub async fn select_candidates<D>(directory: &D, target: &GroupId) -> EngineResult<Selection>
where
    D: Directory + ?Sized,
{
    info!(target_group_id = %target, "Starting scan for closed accounts");

    let accounts = directory.list_accounts().await?;

    let mut candidates = Vec::new();
    let mut lookup_failures = Vec::new();

    for account in accounts {
        if !account.status.is_closed() {
            continue;
        }

        match directory.current_parent(&account.id).await {
            Ok(parent) if &parent == target => {
                debug!(
                    account_id = %account.id,
                    account_name = %account.name,
                    "Skipping closed account already in target group"
                );
            }
            Ok(parent) => {
                info!(
                    account_id = %account.id,
                    account_name = %account.name,
                    current_parent = %parent,
                    "Found closed account to process"
                );
                candidates.push(Candidate {
                    account,
                    current_parent: parent,
                });
            }
            Err(err) => {
                error!(
                    account_id = %account.id,
                    error = %err,
                    error_code = err.error_code(),
                    "Failed to resolve current parent for closed account"
                );
                lookup_failures.push(MoveOutcome::failed(&account, 0, &err));
            }
        }
    }

    info!(
        total_candidates = candidates.len(),
        total_lookup_failures = lookup_failures.len(),
        "Completed scan for closed accounts"
    );

    Ok(Selection {
        candidates,
        lookup_failures,
    })
}
