//! Best-effort notification of successful moves.
//!
//! Notification is decoupled from reconciliation correctness: a publish
//! failure is logged and swallowed, never promoted into an account's
//! outcome or the report.

use async_trait::async_trait;
use tracing::warn;

use crate::error::EngineResult;
use crate::ids::GroupId;
use crate::types::MoveOutcome;

/// Fire-and-forget notification side-channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a human-readable message. Delivery semantics are the
    /// channel's concern, not the engine's.
    async fn publish(&self, subject: &str, message: &str) -> EngineResult<()>;
}

/// Subject line used for move notifications.
pub const MOVED_SUBJECT: &str = "Closed account moved to holding group";

/// Build the human-readable message for a successful move.
pub fn moved_message(outcome: &MoveOutcome, target: &GroupId) -> String {
    format!(
        "Account {} ({}) was moved to group {}",
        outcome.account_name, outcome.account_id, target
    )
}

/// Publish a notification for a successful move, swallowing any publish
/// error after logging it.
pub async fn notify_moved(notifier: &dyn Notifier, outcome: &MoveOutcome, target: &GroupId) {
    let message = moved_message(outcome, target);
    if let Err(err) = notifier.publish(MOVED_SUBJECT, &message).await {
        warn!(
            account_id = %outcome.account_id,
            error = %err,
            error_code = err.error_code(),
            "Failed to publish move notification"
        );
    }
}
