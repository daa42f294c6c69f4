//! Reads and mutations over the fixture store.
//!
//! Every mutation finds its target by exact identifier inside one lock
//! acquisition, stamps timestamps from the injected clock and returns the
//! updated record. A missing identifier leaves the store untouched.

use std::sync::Arc;

use chrono_tz::Tz;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::{
    ActionItem, ActionItemPatch, ActivityEntry, Draft, DraftRejection, DraftTransitionError,
    Error, FixtureStore, InboxStatus, InboxStatusPatch, NewActivity, SyncPayload, Task, TaskPatch,
};

/// Zone used to render activity display times.
pub const DISPLAY_ZONE: Tz = chrono_tz::America::New_York;

fn not_found(kind: &str, id: &str) -> Error {
    Error::not_found(format!("{kind} {id} not found")).with_details(json!({ "id": id }))
}

fn transition_conflict(id: &str, err: DraftTransitionError) -> Error {
    Error::conflict(format!("draft {id} cannot change: {err}")).with_details(json!({
        "id": id,
        "status": err.current,
    }))
}

/// Dashboard operations backed by a shared [`FixtureStore`].
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<FixtureStore>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Create a service over `store`, taking timestamps from `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use command_center::domain::{DashboardService, FixtureStore};
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(FixtureStore::seeded().expect("fixtures decode"));
    /// let service = DashboardService::new(store, Arc::new(DefaultClock));
    /// let task = service.complete_task("f7").expect("seeded task");
    /// assert!(task.is_done());
    /// ```
    pub fn new(store: Arc<FixtureStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.store.tasks()
    }

    /// Mark a task done. Repeated calls keep the first completion time.
    pub fn complete_task(&self, id: &str) -> Result<Task, Error> {
        let now = self.clock.utc();
        let task = self.store.tasks_mut(|tasks| {
            let task = tasks.iter_mut().find(|task| task.id == id)?;
            task.complete(now);
            Some(task.clone())
        });
        let task = task.ok_or_else(|| not_found("task", id))?;
        info!(task_id = %task.id, "task completed");
        Ok(task)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task, Error> {
        self.store
            .tasks_mut(|tasks| {
                let task = tasks.iter_mut().find(|task| task.id == id)?;
                task.apply(patch);
                Some(task.clone())
            })
            .ok_or_else(|| not_found("task", id))
    }

    pub fn drafts(&self) -> Vec<Draft> {
        self.store.drafts()
    }

    /// Approve a draft for sending.
    ///
    /// Approving twice is a no-op; approving a rejected draft is a conflict.
    pub fn send_draft(&self, id: &str) -> Result<Draft, Error> {
        let now = self.clock.utc();
        let outcome = self.store.drafts_mut(|drafts| {
            let draft = drafts.iter_mut().find(|draft| draft.id == id)?;
            Some(draft.approve(now).map(|()| draft.clone()))
        });
        match outcome {
            None => Err(not_found("draft", id)),
            Some(Err(err)) => Err(transition_conflict(id, err)),
            Some(Ok(draft)) => {
                info!(draft_id = %draft.id, "draft approved");
                Ok(draft)
            }
        }
    }

    /// Reject a draft, keeping any supplied note.
    pub fn reject_draft(&self, id: &str, rejection: DraftRejection) -> Result<Draft, Error> {
        let now = self.clock.utc();
        let outcome = self.store.drafts_mut(|drafts| {
            let draft = drafts.iter_mut().find(|draft| draft.id == id)?;
            Some(draft.reject(rejection, now).map(|()| draft.clone()))
        });
        match outcome {
            None => Err(not_found("draft", id)),
            Some(Err(err)) => Err(transition_conflict(id, err)),
            Some(Ok(draft)) => {
                info!(draft_id = %draft.id, "draft rejected");
                Ok(draft)
            }
        }
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.store.activity()
    }

    /// Prepend a new activity entry.
    pub fn record_activity(&self, activity: NewActivity) -> Result<ActivityEntry, Error> {
        if activity.text.trim().is_empty() {
            return Err(Error::invalid_request("activity text must not be empty"));
        }
        let entry = ActivityEntry::record(activity, self.clock.utc(), DISPLAY_ZONE);
        self.store
            .activity_mut(|log| log.insert(0, entry.clone()));
        Ok(entry)
    }

    pub fn inbox_status(&self) -> InboxStatus {
        self.store.inbox_status()
    }

    pub fn update_inbox_status(&self, patch: InboxStatusPatch) -> InboxStatus {
        self.store.inbox_status_mut(|status| {
            status.apply(patch);
            status.clone()
        })
    }

    pub fn action_items(&self) -> Vec<ActionItem> {
        self.store.action_items()
    }

    /// Mark an action item done. Repeated calls keep the first completion
    /// time.
    pub fn complete_action_item(&self, id: &str) -> Result<ActionItem, Error> {
        let now = self.clock.utc();
        self.store
            .action_items_mut(|items| {
                let item = items.iter_mut().find(|item| item.id == id)?;
                item.complete(now);
                Some(item.clone())
            })
            .ok_or_else(|| not_found("action item", id))
    }

    pub fn update_action_item(&self, id: &str, patch: ActionItemPatch) -> Result<ActionItem, Error> {
        self.store
            .action_items_mut(|items| {
                let item = items.iter_mut().find(|item| item.id == id)?;
                item.apply(patch);
                Some(item.clone())
            })
            .ok_or_else(|| not_found("action item", id))
    }

    /// Replace the collections present in `payload`.
    pub fn sync(&self, payload: SyncPayload) -> Vec<&'static str> {
        let synced = self.store.bulk_sync(payload);
        info!(synced = ?synced, "collections synced");
        synced
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
