//! Activity log entries and the inbox status singleton.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const DEFAULT_ICON: &str = "📌";

/// One line of the activity log. The log is kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Stable identifier such as `a0` or `a1769638200000`.
    pub id: String,
    /// Display time such as `4:10 PM`.
    pub time: String,
    /// Free-text description.
    pub text: String,
    /// Icon glyph.
    pub icon: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

/// Body accepted by `POST /api/activity`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    /// Description of what happened.
    pub text: String,
    /// Optional icon; defaults to a pin.
    pub icon: Option<String>,
}

impl ActivityEntry {
    /// Build a new entry stamped at `now`, with its display time rendered in
    /// `zone`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use command_center::domain::{ActivityEntry, NewActivity};
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 1, 28, 21, 10, 0).single().expect("valid time");
    /// let entry = ActivityEntry::record(
    ///     NewActivity { text: "Email sweep".to_owned(), icon: None },
    ///     now,
    ///     chrono_tz::America::New_York,
    /// );
    /// assert_eq!(entry.time, "4:10 PM");
    /// ```
    pub fn record(activity: NewActivity, now: DateTime<Utc>, zone: Tz) -> Self {
        let icon = activity
            .icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_owned());
        Self {
            id: format!("a{}", now.timestamp_millis()),
            time: now.with_timezone(&zone).format("%-I:%M %p").to_string(),
            text: activity.text,
            icon,
            created_at: now,
        }
    }
}

/// Inbox review summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxStatus {
    /// When the inbox was last reviewed.
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Messages waiting for a response.
    pub pending_count: u32,
    /// Messages flagged urgent.
    pub urgent_count: u32,
}

/// Partial update accepted by `POST /api/inbox-status`.
///
/// `lastReviewed: null` clears the timestamp; an absent key keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxStatusPatch {
    /// Outer `None` means absent; inner `None` means explicit null.
    #[serde(default, deserialize_with = "present")]
    pub last_reviewed: Option<Option<DateTime<Utc>>>,
    /// New pending count.
    pub pending_count: Option<u32>,
    /// New urgent count.
    pub urgent_count: Option<u32>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl InboxStatus {
    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: InboxStatusPatch) {
        if let Some(last_reviewed) = patch.last_reviewed {
            self.last_reviewed = last_reviewed;
        }
        if let Some(pending) = patch.pending_count {
            self.pending_count = pending;
        }
        if let Some(urgent) = patch.urgent_count {
            self.urgent_count = urgent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 28, 14, 5, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn record_defaults_icon_and_derives_id() {
        let entry = ActivityEntry::record(
            NewActivity {
                text: "Calendar checked".to_owned(),
                icon: Some("  ".to_owned()),
            },
            now(),
            chrono_tz::America::New_York,
        );
        assert_eq!(entry.icon, "📌");
        assert_eq!(entry.id, format!("a{}", now().timestamp_millis()));
        assert_eq!(entry.time, "9:05 AM");
    }

    #[rstest]
    fn inbox_patch_distinguishes_null_from_absent() {
        let mut status = InboxStatus {
            last_reviewed: Some(now()),
            pending_count: 3,
            urgent_count: 1,
        };

        let keep: InboxStatusPatch =
            serde_json::from_str(r#"{"pendingCount":5}"#).expect("patch decodes");
        status.apply(keep);
        assert_eq!(status.last_reviewed, Some(now()));
        assert_eq!(status.pending_count, 5);
        assert_eq!(status.urgent_count, 1);

        let clear: InboxStatusPatch =
            serde_json::from_str(r#"{"lastReviewed":null}"#).expect("patch decodes");
        status.apply(clear);
        assert_eq!(status.last_reviewed, None);
        assert_eq!(status.pending_count, 5);
    }
}
