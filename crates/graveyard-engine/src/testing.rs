//! In-memory fakes shared by the engine's unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::directory::Directory;
use crate::error::{EngineError, EngineResult};
use crate::ids::{AccountId, GroupId};
use crate::notify::Notifier;
use crate::types::{Account, AccountStatus, OrgGroup};

/// In-memory directory with a programmable failure script.
///
/// Moves actually mutate the parent table, so idempotency tests can run
/// the engine twice against the same instance.
pub struct InMemoryDirectory {
    root: GroupId,
    children: HashMap<GroupId, Vec<OrgGroup>>,
    accounts: Vec<Account>,
    parents: Mutex<HashMap<AccountId, GroupId>>,
    /// Errors returned by successive `move_account` calls, per account.
    /// Once a queue is drained the move succeeds.
    move_failures: Mutex<HashMap<AccountId, VecDeque<EngineError>>>,
    /// Accounts whose parent lookup fails (error consumed on first use).
    parent_failures: Mutex<HashMap<AccountId, EngineError>>,
    pub move_calls: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            root: GroupId::new("r-root"),
            children: HashMap::new(),
            accounts: Vec::new(),
            parents: Mutex::new(HashMap::new()),
            move_failures: Mutex::new(HashMap::new()),
            parent_failures: Mutex::new(HashMap::new()),
            move_calls: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> GroupId {
        self.root.clone()
    }

    pub fn add_group(&mut self, parent: &GroupId, id: &str, name: &str) -> GroupId {
        let group_id = GroupId::new(id);
        let group = OrgGroup {
            id: group_id.clone(),
            name: name.to_string(),
            parent_id: Some(parent.clone()),
        };
        self.children.entry(parent.clone()).or_default().push(group);
        group_id
    }

    pub fn add_account(&mut self, id: &str, name: &str, status: AccountStatus, parent: &GroupId) {
        let account_id = AccountId::new(id);
        self.accounts.push(Account {
            id: account_id.clone(),
            name: name.to_string(),
            status,
        });
        self.parents
            .lock()
            .unwrap()
            .insert(account_id, parent.clone());
    }

    /// Script the next `move_account` calls for `account` to fail with
    /// the given errors, in order.
    pub fn fail_moves(&self, account: &str, errors: Vec<EngineError>) {
        self.move_failures
            .lock()
            .unwrap()
            .insert(AccountId::new(account), errors.into());
    }

    /// Script the parent lookup for `account` to fail once.
    pub fn fail_parent_lookup(&self, account: &str, error: EngineError) {
        self.parent_failures
            .lock()
            .unwrap()
            .insert(AccountId::new(account), error);
    }

    pub fn parent_of(&self, account: &str) -> Option<GroupId> {
        self.parents
            .lock()
            .unwrap()
            .get(&AccountId::new(account))
            .cloned()
    }

    pub fn move_call_count(&self) -> usize {
        self.move_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn root_group_id(&self) -> EngineResult<GroupId> {
        Ok(self.root.clone())
    }

    async fn list_groups_under(&self, parent: &GroupId) -> EngineResult<Vec<OrgGroup>> {
        Ok(self.children.get(parent).cloned().unwrap_or_default())
    }

    async fn list_accounts(&self) -> EngineResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn current_parent(&self, account: &AccountId) -> EngineResult<GroupId> {
        if let Some(err) = self.parent_failures.lock().unwrap().remove(account) {
            return Err(err);
        }
        self.parents
            .lock()
            .unwrap()
            .get(account)
            .cloned()
            .ok_or_else(|| EngineError::ParentNotFound {
                account_id: account.clone(),
            })
    }

    async fn move_account(
        &self,
        account: &AccountId,
        _from: &GroupId,
        to: &GroupId,
    ) -> EngineResult<()> {
        self.move_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(queue) = self.move_failures.lock().unwrap().get_mut(account) {
            if let Some(err) = queue.pop_front() {
                return Err(err);
            }
        }

        self.parents
            .lock()
            .unwrap()
            .insert(account.clone(), to.clone());
        Ok(())
    }
}

/// Notifier that records every publish, optionally failing each call.
pub struct RecordingNotifier {
    pub published: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> EngineResult<()> {
        if self.fail {
            return Err(EngineError::unavailable("notification channel down"));
        }
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}
