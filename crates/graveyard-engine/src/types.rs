//! Core domain types: accounts, groups, and per-account move outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AccountId, GroupId};

/// Lifecycle status of an account as reported by the directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account is live and in use.
    Active,
    /// Account has been closed. This is the only status the engine acts on.
    Suspended,
    /// Closure has been requested but not yet completed.
    PendingClosure,
}

impl AccountStatus {
    /// Whether this status marks the account as closed for reconciliation
    /// purposes.
    pub fn is_closed(&self) -> bool {
        matches!(self, AccountStatus::Suspended)
    }

    /// String form used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Suspended => "SUSPENDED",
            AccountStatus::PendingClosure => "PENDING_CLOSURE",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movable account tracked by the directory service.
///
/// Immutable for the duration of one invocation except for its group
/// membership, which only the move executor changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub status: AccountStatus,
}

/// A node in the hierarchical containment tree.
///
/// Read-only within the engine: groups are never created, renamed, or
/// deleted here. Children are discovered lazily through
/// [`Directory::list_groups_under`](crate::Directory::list_groups_under).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgGroup {
    pub id: GroupId,
    pub name: String,
    /// `None` for the organization root.
    pub parent_id: Option<GroupId>,
}

/// An account selected for a move attempt, with the parent link derived
/// for this run. Parent links are never cached across invocations.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub account: Account,
    pub current_parent: GroupId,
}

/// Terminal result of processing one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveResult {
    /// The account was moved into the target group.
    Moved,
    /// No action was needed.
    Skipped,
    /// The move could not be completed.
    Failed,
}

/// Outcome of processing one candidate account.
///
/// Exactly one of these exists per candidate per invocation, immutable
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub account_id: AccountId,
    pub account_name: String,
    pub result: MoveResult,
    /// Move attempts consumed. Zero means the failure happened during
    /// selection, before any move was attempted.
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoveOutcome {
    /// Outcome for a successful move at the given attempt.
    pub fn moved(account: &Account, attempts: u32) -> Self {
        Self {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            result: MoveResult::Moved,
            attempts,
            error: None,
        }
    }

    /// Outcome for a failed move.
    pub fn failed(account: &Account, attempts: u32, error: &crate::EngineError) -> Self {
        Self {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            result: MoveResult::Failed,
            attempts,
            error: Some(error.to_string()),
        }
    }
}
