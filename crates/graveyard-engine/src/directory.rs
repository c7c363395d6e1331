//! The directory service trait.
//!
//! The engine never talks to the directory service directly; everything
//! goes through [`Directory`] so the engine can run against a REST client
//! in production and an in-memory fake in tests.

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::ids::{AccountId, GroupId};
use crate::types::{Account, OrgGroup};

/// External directory/organization service.
///
/// Each method maps to one service call with the service's own rate
/// limits and transient-failure behavior; implementations surface those
/// as [`EngineError`](crate::EngineError) values with the appropriate
/// transient/permanent classification and do no retrying of their own.
/// Retry is the engine's job.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve the organization root group.
    async fn root_group_id(&self) -> EngineResult<GroupId>;

    /// List the direct child groups of `parent`.
    ///
    /// Ordering is the service's and is treated as deterministic for a
    /// fixed tree shape.
    async fn list_groups_under(&self, parent: &GroupId) -> EngineResult<Vec<OrgGroup>>;

    /// List every account in the organization.
    ///
    /// Called once per invocation; the engine never caches the listing
    /// across invocations.
    async fn list_accounts(&self) -> EngineResult<Vec<Account>>;

    /// Resolve the group an account currently sits in.
    async fn current_parent(&self, account: &AccountId) -> EngineResult<GroupId>;

    /// Move an account between groups.
    ///
    /// Moving an account that is already at the destination must be a
    /// no-op or a safely repeatable error; the engine relies on this for
    /// convergence when two invocations overlap.
    async fn move_account(
        &self,
        account: &AccountId,
        from: &GroupId,
        to: &GroupId,
    ) -> EngineResult<()>;
}
