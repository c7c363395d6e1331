//! Single-account move under the retry policy.

use tracing::{debug, error, info};

use crate::directory::Directory;
use crate::ids::GroupId;
use crate::resilience::{RetryOutcome, RetryPolicy};
use crate::types::{Candidate, MoveOutcome};

/// Executes one move per candidate, translating the retry result into a
/// [`MoveOutcome`]. A failure here never aborts the surrounding loop;
/// every candidate gets its own outcome.
pub struct MoveExecutor<'a, D: ?Sized> {
    directory: &'a D,
    policy: RetryPolicy,
}

impl<'a, D> MoveExecutor<'a, D>
where
    D: Directory + ?Sized,
{
    pub fn new(directory: &'a D, policy: RetryPolicy) -> Self {
        Self { directory, policy }
    }

    /// Move one candidate into the target group.
    ///
    /// Transient directory errors are retried per the policy; permanent
    /// errors fail the account immediately with `attempts = 1`. The
    /// outcome always records how many attempts were consumed and, on
    /// failure, the last error seen.
    pub async fn execute(&self, candidate: &Candidate, target: &GroupId) -> MoveOutcome {
        let account = &candidate.account;

        debug!(
            account_id = %account.id,
            from = %candidate.current_parent,
            to = %target,
            "Attempting to move account to target group"
        );

        let RetryOutcome { attempts, result } = self
            .policy
            .run(|| {
                self.directory
                    .move_account(&account.id, &candidate.current_parent, target)
            })
            .await;

        match result {
            Ok(()) => {
                info!(
                    account_id = %account.id,
                    target_group_id = %target,
                    attempts,
                    "Account moved to target group"
                );
                MoveOutcome::moved(account, attempts)
            }
            Err(err) => {
                error!(
                    account_id = %account.id,
                    attempts,
                    error = %err,
                    error_code = err.error_code(),
                    "Error processing account"
                );
                MoveOutcome::failed(account, attempts, &err)
            }
        }
    }
}
