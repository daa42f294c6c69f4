//! Process-local fixture store.
//!
//! Holds every dashboard collection behind one mutex. Read-modify-write
//! cycles run inside a single lock acquisition via the `*_mut` helpers, so a
//! mutation never observes a half-applied bulk sync. Contents are lost on
//! restart.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use tracing::debug;

use super::{ActionItem, ActivityEntry, Draft, InboxStatus, Task};

const SEED_TASKS: &str = include_str!("../../fixtures/tasks.json");
const SEED_DRAFTS: &str = include_str!("../../fixtures/drafts.json");
const SEED_ACTIVITY: &str = include_str!("../../fixtures/activity.json");
const SEED_INBOX_STATUS: &str = include_str!("../../fixtures/inbox_status.json");
const SEED_ACTION_ITEMS: &str = include_str!("../../fixtures/action_items.json");

/// Failure decoding a bundled fixture.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode {collection} fixture: {source}")]
pub struct FixtureError {
    /// Collection whose fixture was malformed.
    pub collection: &'static str,
    #[source]
    source: serde_json::Error,
}

fn decode<T>(collection: &'static str, raw: &str) -> Result<T, FixtureError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(raw).map_err(|source| FixtureError { collection, source })
}

/// Every collection the dashboard serves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    pub tasks: Vec<Task>,
    pub drafts: Vec<Draft>,
    /// Newest entry first.
    pub activity: Vec<ActivityEntry>,
    pub inbox_status: InboxStatus,
    pub action_items: Vec<ActionItem>,
}

impl Collections {
    /// Decode the fixtures bundled into the binary.
    ///
    /// # Errors
    /// Returns [`FixtureError`] naming the first fixture that fails to decode.
    pub fn seeded() -> Result<Self, FixtureError> {
        Ok(Self {
            tasks: decode("tasks", SEED_TASKS)?,
            drafts: decode("drafts", SEED_DRAFTS)?,
            activity: decode("activity", SEED_ACTIVITY)?,
            inbox_status: decode("inboxStatus", SEED_INBOX_STATUS)?,
            action_items: decode("actionItems", SEED_ACTION_ITEMS)?,
        })
    }
}

/// Bulk replacement payload accepted by `POST /api/sync`.
///
/// Only the collections present as keys are replaced; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub drafts: Option<Vec<Draft>>,
    pub tasks: Option<Vec<Task>>,
    pub activity: Option<Vec<ActivityEntry>>,
    pub inbox_status: Option<InboxStatus>,
    pub action_items: Option<Vec<ActionItem>>,
}

/// Shared in-memory store for the dashboard collections.
///
/// # Examples
/// ```
/// use command_center::domain::{Collections, FixtureStore};
///
/// let store = FixtureStore::new(Collections::seeded().expect("fixtures decode"));
/// assert_eq!(store.tasks().len(), 14);
/// ```
#[derive(Debug, Default)]
pub struct FixtureStore {
    collections: Mutex<Collections>,
}

impl FixtureStore {
    /// Wrap the supplied collections.
    pub fn new(collections: Collections) -> Self {
        Self {
            collections: Mutex::new(collections),
        }
    }

    /// Build a store from the bundled fixtures.
    ///
    /// # Errors
    /// Propagates [`FixtureError`] from [`Collections::seeded`].
    pub fn seeded() -> Result<Self, FixtureError> {
        Collections::seeded().map(Self::new)
    }

    // A panicking handler must not take the whole store down with it.
    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every collection.
    pub fn snapshot(&self) -> Collections {
        self.lock().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.lock().tasks = tasks;
    }

    pub fn drafts(&self) -> Vec<Draft> {
        self.lock().drafts.clone()
    }

    pub fn set_drafts(&self, drafts: Vec<Draft>) {
        self.lock().drafts = drafts;
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.lock().activity.clone()
    }

    pub fn set_activity(&self, activity: Vec<ActivityEntry>) {
        self.lock().activity = activity;
    }

    pub fn inbox_status(&self) -> InboxStatus {
        self.lock().inbox_status.clone()
    }

    pub fn set_inbox_status(&self, status: InboxStatus) {
        self.lock().inbox_status = status;
    }

    pub fn action_items(&self) -> Vec<ActionItem> {
        self.lock().action_items.clone()
    }

    pub fn set_action_items(&self, items: Vec<ActionItem>) {
        self.lock().action_items = items;
    }

    /// Run `f` against the task list while holding the lock.
    pub fn tasks_mut<R>(&self, f: impl FnOnce(&mut Vec<Task>) -> R) -> R {
        f(&mut self.lock().tasks)
    }

    /// Run `f` against the draft list while holding the lock.
    pub fn drafts_mut<R>(&self, f: impl FnOnce(&mut Vec<Draft>) -> R) -> R {
        f(&mut self.lock().drafts)
    }

    /// Run `f` against the activity log while holding the lock.
    pub fn activity_mut<R>(&self, f: impl FnOnce(&mut Vec<ActivityEntry>) -> R) -> R {
        f(&mut self.lock().activity)
    }

    /// Run `f` against the inbox status while holding the lock.
    pub fn inbox_status_mut<R>(&self, f: impl FnOnce(&mut InboxStatus) -> R) -> R {
        f(&mut self.lock().inbox_status)
    }

    /// Run `f` against the action items while holding the lock.
    pub fn action_items_mut<R>(&self, f: impl FnOnce(&mut Vec<ActionItem>) -> R) -> R {
        f(&mut self.lock().action_items)
    }

    /// Replace the collections present in `payload` and return their wire
    /// names in a fixed order.
    pub fn bulk_sync(&self, payload: SyncPayload) -> Vec<&'static str> {
        let SyncPayload {
            drafts,
            tasks,
            activity,
            inbox_status,
            action_items,
        } = payload;
        let mut synced = Vec::new();
        let mut collections = self.lock();
        if let Some(drafts) = drafts {
            collections.drafts = drafts;
            synced.push("drafts");
        }
        if let Some(tasks) = tasks {
            collections.tasks = tasks;
            synced.push("tasks");
        }
        if let Some(activity) = activity {
            collections.activity = activity;
            synced.push("activity");
        }
        if let Some(status) = inbox_status {
            collections.inbox_status = status;
            synced.push("inboxStatus");
        }
        if let Some(items) = action_items {
            collections.action_items = items;
            synced.push("actionItems");
        }
        drop(collections);
        debug!(synced = ?synced, "bulk sync applied");
        synced
    }
}
