//! Email drafts awaiting approval.
//!
//! Drafts start `pending` and end either `approved` or `rejected`. Repeating
//! the same terminal action is a no-op; crossing from one terminal state to
//! the other is refused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Waiting for review.
    Pending,
    /// Approved for sending.
    Approved,
    /// Rejected, optionally with a note.
    Rejected,
}

/// A draft email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Stable identifier such as `draft-001`.
    pub id: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Review state.
    pub status: DraftStatus,
    /// Free-text grouping label.
    pub category: String,
    /// When the draft was written.
    pub created_at: DateTime<Utc>,
    /// Stamped on approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Stamped on rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    /// Reviewer note supplied with a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_note: Option<String>,
}

/// Body accepted by `POST /api/drafts/{id}/reject`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRejection {
    /// Optional reviewer note.
    pub note: Option<String>,
}

/// Refused terminal-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("draft is already {current:?}")]
pub struct DraftTransitionError {
    /// State the draft was found in.
    pub current: DraftStatus,
}

impl Draft {
    /// Approve the draft.
    ///
    /// # Errors
    /// Returns [`DraftTransitionError`] when the draft was already rejected.
    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<(), DraftTransitionError> {
        match self.status {
            DraftStatus::Approved => Ok(()),
            DraftStatus::Rejected => Err(DraftTransitionError {
                current: self.status,
            }),
            DraftStatus::Pending => {
                self.status = DraftStatus::Approved;
                self.approved_at = Some(now);
                Ok(())
            }
        }
    }

    /// Reject the draft, keeping any supplied note.
    ///
    /// # Errors
    /// Returns [`DraftTransitionError`] when the draft was already approved.
    pub fn reject(
        &mut self,
        rejection: DraftRejection,
        now: DateTime<Utc>,
    ) -> Result<(), DraftTransitionError> {
        match self.status {
            DraftStatus::Approved => {
                return Err(DraftTransitionError {
                    current: self.status,
                });
            }
            DraftStatus::Pending => {
                self.status = DraftStatus::Rejected;
                self.rejected_at = Some(now);
            }
            DraftStatus::Rejected => {}
        }
        if let Some(note) = rejection.note.filter(|note| !note.trim().is_empty()) {
            self.rejection_note = Some(note);
        }
        Ok(())
    }
}
