//! Background poller keeping a [`ViewState`] current.
//!
//! Every source runs on its own tokio task with its own timer. A successful
//! fetch replaces that source's slice; a failure is logged and the previous
//! slice stays. Tasks run until [`Poller::stop`] aborts them.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mockable::Clock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::view::ViewState;
use crate::domain::ports::{DashboardApi, DashboardApiError};
use crate::domain::{
    ActionItem, ActivityEntry, Draft, InboxStatus, IssueBoard, PaymentsSnapshot, ScoreReport,
    Task,
};

/// Refresh cadence per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Tasks, drafts, activity, inbox status and action items.
    pub collections: Duration,
    pub issue_board: Duration,
    /// Score cadence while no game is live.
    pub scores: Duration,
    /// Score cadence while a game is live.
    pub scores_live: Duration,
    pub payments: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            collections: Duration::from_secs(30),
            issue_board: Duration::from_secs(300),
            scores: Duration::from_secs(300),
            scores_live: Duration::from_secs(30),
            payments: Duration::from_secs(300),
        }
    }
}

impl PollIntervals {
    /// Delay before the next score fetch given the latest view.
    pub fn next_score_delay(&self, view: &ViewState) -> Duration {
        let live = view.scores.as_ref().is_some_and(|report| report.is_live);
        if live { self.scores_live } else { self.scores }
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn merge<T>(
    state: &Mutex<ViewState>,
    source: &'static str,
    result: Result<T, DashboardApiError>,
    apply: impl FnOnce(&mut ViewState, T),
) {
    match result {
        Ok(value) => {
            apply(&mut lock(state), value);
            debug!(source, "poll refreshed");
        }
        Err(error) => {
            warn!(source, %error, "poll failed; keeping previous data");
        }
    }
}

/// Owns the polling tasks and the view they write to.
pub struct Poller {
    api: Arc<dyn DashboardApi>,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<ViewState>>,
    handles: Vec<JoinHandle<()>>,
}

impl Poller {
    pub fn new(api: Arc<dyn DashboardApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            state: Arc::new(Mutex::new(ViewState::default())),
            handles: Vec::new(),
        }
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Fetch every source once, in sequence.
    pub async fn refresh_once(&self) {
        let state = self.state.as_ref();
        merge(state, "tasks", self.api.tasks().await, |view, tasks: Vec<Task>| {
            view.tasks = Some(tasks);
        });
        merge(state, "drafts", self.api.drafts().await, |view, drafts: Vec<Draft>| {
            view.drafts = Some(drafts);
        });
        merge(
            state,
            "activity",
            self.api.activity().await,
            |view, activity: Vec<ActivityEntry>| view.activity = Some(activity),
        );
        merge(
            state,
            "inbox_status",
            self.api.inbox_status().await,
            |view, status: InboxStatus| view.inbox_status = Some(status),
        );
        merge(
            state,
            "action_items",
            self.api.action_items().await,
            |view, items: Vec<ActionItem>| view.action_items = Some(items),
        );
        merge(
            state,
            "issue_board",
            self.api.issue_board().await,
            |view, board: IssueBoard| view.issue_board = Some(board),
        );
        merge(state, "scores", self.api.scores().await, |view, report: ScoreReport| {
            view.scores = Some(report);
        });
        merge(
            state,
            "payments",
            self.api.payments().await,
            |view, snapshot: PaymentsSnapshot| view.payments = Some(snapshot),
        );
    }

    /// Spawn one repeating task per source. Restarting stops the previous set.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, intervals: PollIntervals) {
        self.stop();
        let every = |period: Duration| move |_: &ViewState| period;

        self.spawn_source(
            "tasks",
            |api| async move { api.tasks().await },
            |view: &mut ViewState, tasks: Vec<Task>| view.tasks = Some(tasks),
            every(intervals.collections),
        );
        self.spawn_source(
            "drafts",
            |api| async move { api.drafts().await },
            |view: &mut ViewState, drafts: Vec<Draft>| view.drafts = Some(drafts),
            every(intervals.collections),
        );
        self.spawn_source(
            "activity",
            |api| async move { api.activity().await },
            |view: &mut ViewState, activity: Vec<ActivityEntry>| view.activity = Some(activity),
            every(intervals.collections),
        );
        self.spawn_source(
            "inbox_status",
            |api| async move { api.inbox_status().await },
            |view: &mut ViewState, status: InboxStatus| view.inbox_status = Some(status),
            every(intervals.collections),
        );
        self.spawn_source(
            "action_items",
            |api| async move { api.action_items().await },
            |view: &mut ViewState, items: Vec<ActionItem>| view.action_items = Some(items),
            every(intervals.collections),
        );
        self.spawn_source(
            "issue_board",
            |api| async move { api.issue_board().await },
            |view: &mut ViewState, board: IssueBoard| view.issue_board = Some(board),
            every(intervals.issue_board),
        );
        self.spawn_source(
            "scores",
            |api| async move { api.scores().await },
            |view: &mut ViewState, report: ScoreReport| view.scores = Some(report),
            move |view: &ViewState| intervals.next_score_delay(view),
        );
        self.spawn_source(
            "payments",
            |api| async move { api.payments().await },
            |view: &mut ViewState, snapshot: PaymentsSnapshot| view.payments = Some(snapshot),
            every(intervals.payments),
        );
        info!(sources = self.handles.len(), "poller started");
    }

    fn spawn_source<T, F, Fut, A, D>(&mut self, source: &'static str, fetch: F, apply: A, delay: D)
    where
        T: Send + 'static,
        F: Fn(Arc<dyn DashboardApi>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DashboardApiError>> + Send + 'static,
        A: Fn(&mut ViewState, T) + Send + 'static,
        D: Fn(&ViewState) -> Duration + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        self.handles.push(tokio::spawn(async move {
            loop {
                let result = fetch(Arc::clone(&api)).await;
                merge(&state, source, result, &apply);
                let wait = {
                    let view = lock(&state);
                    delay(&view)
                };
                tokio::time::sleep(wait).await;
            }
        }));
    }

    /// Abort every polling task. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("poller stopped");
    }

    /// Optimistically complete an action item.
    ///
    /// The local record is marked done at once and the request runs in the
    /// background. There is no rollback: if the request fails the item stays
    /// done locally until the next action-item poll replaces the slice.
    ///
    /// Must be called from within a tokio runtime.
    pub fn complete_action_item(&self, id: &str) -> JoinHandle<()> {
        let found = lock(&self.state).mark_action_item_done(id, self.clock.utc());
        if !found {
            debug!(id, "completing action item missing from local view");
        }
        let api = Arc::clone(&self.api);
        let id = id.to_owned();
        tokio::spawn(async move {
            if let Err(error) = api.complete_action_item(&id).await {
                warn!(id = %id, %error, "action item completion failed; local state not rolled back");
            }
        })
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
