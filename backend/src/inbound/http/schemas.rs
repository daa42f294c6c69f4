//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use chrono::{DateTime, NaiveDate, Utc};
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer token is missing or wrong.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// No record carries the requested identifier.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record's state forbids the transition.
    #[schema(rename = "conflict")]
    Conflict,
    /// An upstream API failed and nothing was cached.
    #[schema(rename = "upstream_unavailable")]
    UpstreamUnavailable,
    /// A required credential is not configured.
    #[schema(rename = "not_configured")]
    NotConfigured,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "task t-404 not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "0b9c6a8e-5d0c-4a43-9d1e-7f0f4f0f2a11")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Task`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Task)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskSchema {
    #[schema(example = "f7")]
    id: String,
    title: String,
    /// `finn` or `gavin`.
    #[schema(example = "finn")]
    owner: String,
    /// `pending`, `in-progress` or `done`.
    #[schema(example = "in-progress")]
    status: String,
    /// `high`, `medium` or `low`.
    #[schema(example = "high")]
    priority: String,
    category: String,
    completed_at: Option<DateTime<Utc>>,
}

/// OpenAPI schema for [`crate::domain::TaskPatch`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TaskPatch)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskPatchSchema {
    #[schema(example = "done")]
    status: Option<String>,
    #[schema(example = "low")]
    priority: Option<String>,
    title: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Draft`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Draft)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DraftSchema {
    #[schema(example = "draft-001")]
    id: String,
    to: String,
    subject: String,
    body: String,
    /// `pending`, `approved` or `rejected`.
    #[schema(example = "pending")]
    status: String,
    category: String,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
    rejection_note: Option<String>,
}

/// OpenAPI schema for [`crate::domain::DraftRejection`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DraftRejection)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DraftRejectionSchema {
    #[schema(example = "Tone is too formal")]
    note: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ActivityEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ActivityEntry)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActivityEntrySchema {
    #[schema(example = "a1769638200000")]
    id: String,
    #[schema(example = "4:10 PM")]
    time: String,
    text: String,
    #[schema(example = "📌")]
    icon: String,
    created_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::NewActivity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NewActivity)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewActivitySchema {
    #[schema(example = "Cleared the inbox")]
    text: String,
    icon: Option<String>,
}

/// OpenAPI schema for [`crate::domain::InboxStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InboxStatus)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InboxStatusSchema {
    last_reviewed: Option<DateTime<Utc>>,
    pending_count: u32,
    urgent_count: u32,
}

/// OpenAPI schema for [`crate::domain::InboxStatusPatch`].
///
/// `lastReviewed: null` clears the timestamp; an absent key keeps it.
#[derive(ToSchema)]
#[schema(as = crate::domain::InboxStatusPatch)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InboxStatusPatchSchema {
    last_reviewed: Option<DateTime<Utc>>,
    pending_count: Option<u32>,
    urgent_count: Option<u32>,
}

/// OpenAPI schema for [`crate::domain::ActionItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ActionItem)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActionItemSchema {
    #[schema(example = "ai-017")]
    id: String,
    title: String,
    /// `granola`, `linear`, `email`, `slack` or `imessage`.
    #[schema(example = "linear")]
    source: String,
    source_detail: String,
    project: String,
    /// `urgent`, `high`, `medium` or `low`.
    #[schema(example = "urgent")]
    priority: String,
    due_date: NaiveDate,
    /// `pending` or `done`.
    #[schema(example = "pending")]
    status: String,
    assignee: String,
    notes: String,
    completed_at: Option<DateTime<Utc>>,
}

/// OpenAPI schema for [`crate::domain::ActionItemPatch`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ActionItemPatch)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActionItemPatchSchema {
    #[schema(example = "high")]
    priority: Option<String>,
    #[schema(example = "done")]
    status: Option<String>,
    due_date: Option<NaiveDate>,
}

/// OpenAPI schema for [`crate::domain::SyncPayload`].
///
/// Only the collections present as keys are replaced.
#[derive(ToSchema)]
#[schema(as = crate::domain::SyncPayload)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SyncPayloadSchema {
    drafts: Option<Vec<DraftSchema>>,
    tasks: Option<Vec<TaskSchema>>,
    activity: Option<Vec<ActivityEntrySchema>>,
    inbox_status: Option<InboxStatusSchema>,
    action_items: Option<Vec<ActionItemSchema>>,
}

/// OpenAPI schema for [`crate::domain::IssueBoard`].
///
/// Bucket keys are fixed and always present.
#[derive(ToSchema)]
#[schema(as = crate::domain::IssueBoard)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IssueBoardSchema {
    #[serde(rename = "In Progress")]
    #[schema(value_type = Vec<Object>)]
    in_progress: Vec<serde_json::Value>,
    #[serde(rename = "Todo")]
    #[schema(value_type = Vec<Object>)]
    todo: Vec<serde_json::Value>,
    #[serde(rename = "Backlog")]
    #[schema(value_type = Vec<Object>)]
    backlog: Vec<serde_json::Value>,
    #[serde(rename = "Triage")]
    #[schema(value_type = Vec<Object>)]
    triage: Vec<serde_json::Value>,
    #[serde(rename = "Done")]
    #[schema(value_type = Vec<Object>)]
    done: Vec<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ScoreReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ScoreReport)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ScoreReportSchema {
    #[schema(example = "30-18")]
    record: String,
    #[schema(example = "3rd in East")]
    standing: String,
    #[schema(example = "W2")]
    streak: String,
    /// Tagged by `status`: `scheduled`, `live`, `final` or `noGame`.
    #[schema(value_type = Option<Object>)]
    today_game: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    next_game: Option<serde_json::Value>,
    is_live: bool,
    #[schema(example = "2026-01-28")]
    game_date: String,
}

/// OpenAPI schema for [`crate::domain::PaymentsSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PaymentsSnapshot)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaymentsSnapshotSchema {
    #[schema(example = 1234.56)]
    balance: f64,
    #[schema(example = 99.97)]
    stripe_mrr: f64,
    active_subscriptions: u32,
    total_subscriptions: u32,
    #[schema(value_type = Vec<Object>)]
    subscriptions: Vec<serde_json::Value>,
}
