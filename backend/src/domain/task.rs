//! Tasks tracked for the two dashboard owners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Person responsible for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOwner {
    /// The assistant.
    Finn,
    /// The dashboard's human owner.
    Gavin,
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Needs attention first.
    High,
    /// Default priority.
    Medium,
    /// Can wait.
    Low,
}

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier such as `f7`.
    pub id: String,
    /// Short description.
    pub title: String,
    /// Responsible person.
    pub owner: TaskOwner,
    /// Progress state.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Free-text grouping label.
    pub category: String,
    /// Stamped when the task is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Whitelisted fields accepted by `POST /api/tasks/{id}/update`.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New progress state.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New title; blank titles are ignored.
    pub title: Option<String>,
}

impl Task {
    /// Mark the task done, stamping `completed_at` on the first completion.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Done;
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(title) = patch.title.filter(|title| !title.trim().is_empty()) {
            self.title = title;
        }
    }

    /// Whether the task is finished.
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
