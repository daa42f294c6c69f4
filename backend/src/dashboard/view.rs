//! Client-side view state and the derived action-item presentation.
//!
//! The poller writes one slice per source into [`ViewState`]; everything
//! else here is a pure function of those slices plus "today".

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    ActionItem, ActionPriority, ActionSource, ActivityEntry, Draft, InboxStatus, IssueBoard,
    PaymentsSnapshot, ScoreReport, Task, TaskOwner, TaskStatus,
};

/// Latest successful payload from each source. `None` until the first fetch
/// succeeds; a failed fetch never clears a slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tasks: Option<Vec<Task>>,
    pub drafts: Option<Vec<Draft>>,
    pub activity: Option<Vec<ActivityEntry>>,
    pub inbox_status: Option<InboxStatus>,
    pub action_items: Option<Vec<ActionItem>>,
    pub issue_board: Option<IssueBoard>,
    pub scores: Option<ScoreReport>,
    pub payments: Option<PaymentsSnapshot>,
}

impl ViewState {
    /// Mark an action item done locally, returning whether it was found.
    ///
    /// Used ahead of the server round trip; see
    /// [`crate::dashboard::poller::Poller::complete_action_item`].
    pub fn mark_action_item_done(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(items) = self.action_items.as_mut() else {
            return false;
        };
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.complete(now);
                true
            }
            None => false,
        }
    }
}

/// Secondary ordering applied after the done/overdue partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Earliest due date first.
    #[default]
    DueDate,
    /// Urgent first, low last.
    Priority,
    /// Source name, alphabetically.
    Source,
}

/// Action-item filter; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItemFilter {
    pub source: Option<ActionSource>,
    pub project: Option<String>,
}

impl ActionItemFilter {
    pub fn matches(&self, item: &ActionItem) -> bool {
        self.source.is_none_or(|source| item.source == source)
            && self
                .project
                .as_deref()
                .is_none_or(|project| item.project == project)
    }

    /// Clone the matching items in their original order.
    pub fn apply(&self, items: &[ActionItem]) -> Vec<ActionItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Sort in place: pending before done; among pending, overdue first; then by
/// `key`. The sort is stable, so ties keep their input order.
pub fn sort_action_items(items: &mut [ActionItem], key: SortKey, today: NaiveDate) {
    items.sort_by(|a, b| {
        a.is_done()
            .cmp(&b.is_done())
            .then_with(|| b.is_overdue(today).cmp(&a.is_overdue(today)))
            .then_with(|| match key {
                SortKey::DueDate => a.due_date.cmp(&b.due_date),
                SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
                SortKey::Source => a.source.as_str().cmp(b.source.as_str()),
            })
    });
}

/// Counts over a filtered set of action items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionItemSummary {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
    pub overdue: usize,
    /// `done / total`, or `0.0` for an empty set.
    pub completion_ratio: f64,
    pub by_priority: BTreeMap<ActionPriority, usize>,
    pub by_source: BTreeMap<ActionSource, usize>,
    pub by_project: BTreeMap<String, usize>,
}

impl ActionItemSummary {
    pub fn of(items: &[ActionItem], today: NaiveDate) -> Self {
        let mut summary = Self {
            total: items.len(),
            ..Self::default()
        };
        for item in items {
            if item.is_done() {
                summary.done += 1;
            } else {
                summary.pending += 1;
            }
            if item.is_overdue(today) {
                summary.overdue += 1;
            }
            *summary.by_priority.entry(item.priority).or_default() += 1;
            *summary.by_source.entry(item.source).or_default() += 1;
            *summary.by_project.entry(item.project.clone()).or_default() += 1;
        }
        if summary.total > 0 {
            summary.completion_ratio = summary.done as f64 / summary.total as f64;
        }
        summary
    }
}

/// Filtered, sorted items together with their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItemView {
    pub items: Vec<ActionItem>,
    pub summary: ActionItemSummary,
}

impl ActionItemView {
    pub fn build(
        items: &[ActionItem],
        filter: &ActionItemFilter,
        key: SortKey,
        today: NaiveDate,
    ) -> Self {
        let mut filtered = filter.apply(items);
        let summary = ActionItemSummary::of(&filtered, today);
        sort_action_items(&mut filtered, key, today);
        Self {
            items: filtered,
            summary,
        }
    }
}

/// Done/total tasks for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub owner: TaskOwner,
    pub done: usize,
    pub total: usize,
}

/// Per-owner progress, always listing both owners.
pub fn task_progress(tasks: &[Task]) -> [TaskProgress; 2] {
    [TaskOwner::Finn, TaskOwner::Gavin].map(|owner| {
        let owned = tasks.iter().filter(|task| task.owner == owner);
        let (done, total) = owned.fold((0, 0), |(done, total), task| {
            (done + usize::from(task.status == TaskStatus::Done), total + 1)
        });
        TaskProgress { owner, done, total }
    })
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
