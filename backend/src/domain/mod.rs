//! Domain primitives, services and ports.
//!
//! Purpose: hold the dashboard's records, the fixture store that owns them,
//! the mutation rules and the upstream feed transforms. Nothing here knows
//! about HTTP; inbound adapters map [`Error`] to responses and outbound
//! adapters implement the [`ports`].
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic failure payload.
//! - FixtureStore, DashboardService: collections and their mutations.
//! - IssueBoardService, ScoreFeedService, PaymentsService: cached upstream
//!   feeds.

pub mod action_item;
pub mod activity;
pub mod cache;
pub mod dashboard_service;
pub mod draft;
pub mod error;
pub mod issue_board;
pub mod payments;
pub mod ports;
pub mod score_feed;
pub mod store;
pub mod task;
pub mod trace_id;

pub use self::action_item::{
    ActionItem, ActionItemPatch, ActionPriority, ActionSource, ActionStatus,
};
pub use self::activity::{ActivityEntry, InboxStatus, InboxStatusPatch, NewActivity};
pub use self::cache::{Cached, Freshness, TimeBoxedCache};
pub use self::dashboard_service::{DISPLAY_ZONE, DashboardService};
pub use self::draft::{Draft, DraftRejection, DraftStatus, DraftTransitionError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::issue_board::{
    ISSUE_BOARD_TTL, IssueAssignee, IssueBoard, IssueBoardService, IssueBucket, TrackerIssue,
};
pub use self::payments::{
    PaymentsService, PaymentsSnapshot, SUBSCRIPTION_LIMIT, SubscriptionSummary,
};
pub use self::score_feed::{
    GameStatus, NextGame, SCORE_FEED_TTL, ScoreFeedService, ScoreReport, TodayGame, ordinal,
};
pub use self::store::{Collections, FixtureError, FixtureStore, SyncPayload};
pub use self::task::{Task, TaskOwner, TaskPatch, TaskPriority, TaskStatus};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use command_center::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing bearer token"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
