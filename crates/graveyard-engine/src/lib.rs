//! # Graveyard Reconciliation Engine
//!
//! Converges the membership of a fleet's holding group ("graveyard"):
//! every account in the closed status that is not already parked in the
//! designated group gets moved there, with bounded retry on transient
//! directory errors and per-account failure isolation.
//!
//! The engine talks to the directory service exclusively through the
//! [`Directory`] trait, so it can run against any backing implementation
//! (a REST client in production, an in-memory fake in tests).
//!
//! ## Crate organization
//!
//! - [`ids`] - Type-safe identifiers (`AccountId`, `GroupId`)
//! - [`types`] - Accounts, groups, statuses, per-account outcomes
//! - [`error`] - Error types with transient/permanent classification
//! - [`directory`] - The directory service trait
//! - [`locator`] - Group-tree search by name
//! - [`selector`] - Candidate selection with idempotent exclusion
//! - [`resilience`] - Retry policy with exponential backoff
//! - [`executor`] - Single-account move under the retry policy
//! - [`report`] - Outcome aggregation into the invocation report
//! - [`notify`] - Best-effort notification of successful moves
//! - [`engine`] - Orchestration of one reconciliation pass
//!
//! ## Example
//!
//! ```ignore
//! use graveyard_engine::prelude::*;
//!
//! let engine = ReconciliationEngine::new(
//!     directory,
//!     EngineConfig::new("Graveyard"),
//! );
//! let report = engine.run().await?;
//! println!("moved {} accounts", report.total_processed);
//! ```

pub mod directory;
pub mod engine;
pub mod error;
pub mod executor;
pub mod ids;
pub mod locator;
pub mod notify;
pub mod report;
pub mod resilience;
pub mod selector;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::Directory;
pub use engine::{EngineConfig, ReconciliationEngine};
pub use error::{EngineError, EngineResult};
pub use ids::{AccountId, GroupId};
pub use notify::Notifier;
pub use report::ReconciliationReport;
pub use types::{Account, AccountStatus, MoveOutcome, MoveResult, OrgGroup};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::directory::Directory;
    pub use crate::engine::{EngineConfig, ReconciliationEngine};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::ids::{AccountId, GroupId};
    pub use crate::notify::Notifier;
    pub use crate::report::ReconciliationReport;
    pub use crate::resilience::RetryPolicy;
    pub use crate::types::{Account, AccountStatus, MoveOutcome, MoveResult, OrgGroup};
}
