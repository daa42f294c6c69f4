//! Action items harvested from meetings, trackers and inboxes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Channel an action item was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSource {
    /// Meeting notes.
    Granola,
    /// Issue tracker.
    Linear,
    /// Email inbox.
    Email,
    /// Chat.
    Slack,
    /// Text messages.
    Imessage,
}

impl ActionSource {
    /// Wire name, also used for lexicographic sorting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granola => "granola",
            Self::Linear => "linear",
            Self::Email => "email",
            Self::Slack => "slack",
            Self::Imessage => "imessage",
        }
    }
}

/// Action item urgency, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// Sort rank: urgent is 0, low is 3.
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

/// Completion state of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Done,
}

/// An action item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Stable identifier such as `ai-017`.
    pub id: String,
    pub title: String,
    pub source: ActionSource,
    /// Where in the source channel the item came from.
    pub source_detail: String,
    /// Free-text project label.
    pub project: String,
    pub priority: ActionPriority,
    /// Calendar due date.
    pub due_date: NaiveDate,
    pub status: ActionStatus,
    pub assignee: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Whitelisted fields accepted by `POST /api/action-items/{id}/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemPatch {
    pub priority: Option<ActionPriority>,
    pub status: Option<ActionStatus>,
    pub due_date: Option<NaiveDate>,
}

impl ActionItem {
    /// Mark the item done, stamping `completed_at` on the first completion.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = ActionStatus::Done;
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: ActionItemPatch) {
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    /// Whether the item is finished.
    pub fn is_done(&self) -> bool {
        self.status == ActionStatus::Done
    }

    /// Pending and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date")
    }

    #[fixture]
    fn item() -> ActionItem {
        ActionItem {
            id: "ai-017".to_owned(),
            title: "Check App Store review status".to_owned(),
            source: ActionSource::Linear,
            source_detail: "Ongoing".to_owned(),
            project: "Real Worth".to_owned(),
            priority: ActionPriority::Urgent,
            due_date: date(28),
            status: ActionStatus::Pending,
            assignee: "gavin".to_owned(),
            notes: String::new(),
            completed_at: None,
        }
    }

    #[rstest]
    #[case(27, false)]
    #[case(28, false)]
    #[case(29, true)]
    fn overdue_means_strictly_before_today(item: ActionItem, #[case] today: u32, #[case] expected: bool) {
        assert_eq!(item.is_overdue(date(today)), expected);
    }

    #[rstest]
    fn done_items_are_never_overdue(mut item: ActionItem) {
        item.status = ActionStatus::Done;
        assert!(!item.is_overdue(date(30)));
    }

    #[rstest]
    fn patch_decodes_due_date(mut item: ActionItem) {
        let patch: ActionItemPatch =
            serde_json::from_str(r#"{"dueDate":"2026-02-03"}"#).expect("patch decodes");
        item.apply(patch);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2026, 2, 3).expect("valid date"));
        assert_eq!(item.priority, ActionPriority::Urgent);
    }

    #[rstest]
    #[case(ActionPriority::Urgent, 0)]
    #[case(ActionPriority::Low, 3)]
    fn priority_rank(#[case] priority: ActionPriority, #[case] rank: u8) {
        assert_eq!(priority.rank(), rank);
    }
}
