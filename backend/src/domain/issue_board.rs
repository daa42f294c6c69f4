//! Issue board: recent tracker issues grouped into status buckets.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::{IssueBoardSource, IssueBoardSourceError};
use super::{Error, Freshness, TimeBoxedCache};

/// Board snapshots are reused for five minutes.
pub const ISSUE_BOARD_TTL: Duration = Duration::from_secs(5 * 60);

/// Completed issues older than this many days drop off the board.
const DONE_WINDOW_DAYS: i64 = 7;

/// Issue assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAssignee {
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Issue as served on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerIssue {
    pub id: String,
    /// Human key such as `WNU-42`.
    pub identifier: String,
    pub title: String,
    /// Workflow state name, e.g. `In Review`.
    pub status: String,
    /// Workflow state category: `triage`, `backlog`, `unstarted`, `started`
    /// or `completed`.
    pub status_type: String,
    /// 0 none, 1 urgent through 4 low.
    pub priority: u8,
    pub assignee: Option<IssueAssignee>,
    pub labels: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Display bucket an issue falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueBucket {
    InProgress,
    Todo,
    Backlog,
    Triage,
    Done,
}

impl IssueBucket {
    /// Classify an issue. The state type decides first: `completed`,
    /// `started`, `unstarted` and `triage` map to their buckets. Only when the
    /// type matches none of those does a state named `Triage` count as triage;
    /// anything else is backlog.
    pub fn of(issue: &TrackerIssue) -> Self {
        match issue.status_type.as_str() {
            "completed" => Self::Done,
            "started" => Self::InProgress,
            "unstarted" => Self::Todo,
            "triage" => Self::Triage,
            _ if issue.status == "Triage" => Self::Triage,
            _ => Self::Backlog,
        }
    }
}

/// Issues grouped by bucket. Serialises with every bucket present, in board
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBoard {
    #[serde(rename = "In Progress")]
    pub in_progress: Vec<TrackerIssue>,
    #[serde(rename = "Todo")]
    pub todo: Vec<TrackerIssue>,
    #[serde(rename = "Backlog")]
    pub backlog: Vec<TrackerIssue>,
    #[serde(rename = "Triage")]
    pub triage: Vec<TrackerIssue>,
    #[serde(rename = "Done")]
    pub done: Vec<TrackerIssue>,
}

impl IssueBoard {
    /// Filter, bucket and sort `issues` as of `now`.
    ///
    /// An issue stays if it is not completed or was updated within the last
    /// seven days. Buckets are sorted by ascending priority; ties keep feed
    /// order.
    pub fn build(issues: Vec<TrackerIssue>, now: DateTime<Utc>) -> Self {
        let cutoff = now - TimeDelta::days(DONE_WINDOW_DAYS);
        let mut board = Self::default();
        for issue in issues {
            let bucket = IssueBucket::of(&issue);
            if bucket == IssueBucket::Done && issue.updated_at <= cutoff {
                continue;
            }
            board.bucket_mut(bucket).push(issue);
        }
        for bucket in [
            &mut board.in_progress,
            &mut board.todo,
            &mut board.backlog,
            &mut board.triage,
            &mut board.done,
        ] {
            bucket.sort_by_key(|issue| issue.priority);
        }
        board
    }

    fn bucket_mut(&mut self, bucket: IssueBucket) -> &mut Vec<TrackerIssue> {
        match bucket {
            IssueBucket::InProgress => &mut self.in_progress,
            IssueBucket::Todo => &mut self.todo,
            IssueBucket::Backlog => &mut self.backlog,
            IssueBucket::Triage => &mut self.triage,
            IssueBucket::Done => &mut self.done,
        }
    }

    /// Total issues across all buckets.
    pub fn len(&self) -> usize {
        self.in_progress.len()
            + self.todo.len()
            + self.backlog.len()
            + self.triage.len()
            + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn map_issue_board_error(err: IssueBoardSourceError) -> Error {
    match err {
        IssueBoardSourceError::NotConfigured => Error::not_configured(err.to_string()),
        other => Error::upstream_unavailable(other.to_string()),
    }
}

/// Serves the issue board through a five-minute cache.
pub struct IssueBoardService {
    source: Arc<dyn IssueBoardSource>,
    cache: TimeBoxedCache<IssueBoard>,
    clock: Arc<dyn Clock>,
}

impl IssueBoardService {
    pub fn new(source: Arc<dyn IssueBoardSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TimeBoxedCache::new(ISSUE_BOARD_TTL, clock.clone()),
            clock,
        }
    }

    /// Current board, cached.
    ///
    /// # Errors
    /// [`Error::not_configured`] without an API key; otherwise
    /// [`Error::upstream_unavailable`] when the tracker fails and nothing is
    /// cached.
    pub async fn board(&self) -> Result<IssueBoard, Error> {
        let cached = self
            .cache
            .get_or_refresh(|| async {
                let issues = self.source.fetch_issues().await?;
                Ok::<_, IssueBoardSourceError>(IssueBoard::build(issues, self.clock.utc()))
            })
            .await
            .map_err(|err| {
                warn!(error = %err, "issue board refresh failed");
                map_issue_board_error(err)
            })?;
        if cached.freshness == Freshness::Stale {
            warn!(fetched_at = %cached.fetched_at, "serving stale issue board");
        } else {
            debug!(freshness = ?cached.freshness, issues = cached.value.len(), "issue board served");
        }
        Ok(cached.value)
    }
}

#[cfg(test)]
#[path = "issue_board_tests.rs"]
mod tests;
