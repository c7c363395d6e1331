//! Group-tree search by name.
//!
//! Resolves the target group's identifier once per invocation by walking
//! the containment tree from the organization root. Nothing is cached
//! across invocations, so group renames and moves are picked up on the
//! next run.

use std::collections::VecDeque;

use tracing::{debug, error, info};

use crate::directory::Directory;
use crate::error::{EngineError, EngineResult};
use crate::ids::GroupId;

/// Find a group by name anywhere under the organization root.
///
/// Breadth-first traversal with lazy child expansion; large
/// organizations may have deep hierarchies and the whole tree is never
/// pre-loaded. If multiple groups share the target name, the first one
/// encountered in traversal order wins. That tie-break is a documented
/// limitation: callers are expected to keep group names unique.
///
/// Fails with [`EngineError::GroupNotFound`] when no group in the tree
/// carries the requested name. That failure is invocation-fatal.
pub async fn locate_group<D>(directory: &D, target_name: &str) -> EngineResult<GroupId>
where
    D: Directory + ?Sized,
{
    info!(group_name = target_name, "Searching for group by name");

    let root = directory.root_group_id().await?;

    let mut queue = VecDeque::from([root]);
    while let Some(parent) = queue.pop_front() {
        for group in directory.list_groups_under(&parent).await? {
            if group.name == target_name {
                debug!(
                    group_name = target_name,
                    group_id = %group.id,
                    "Found group"
                );
                return Ok(group.id);
            }
            queue.push_back(group.id);
        }
    }

    error!(group_name = target_name, "Group not found");
    Err(EngineError::GroupNotFound {
        name: target_name.to_string(),
    })
}
