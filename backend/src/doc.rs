//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every `/api` endpoint plus the health probes
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] so domain types stay free of utoipa
//! - **Security**: the bearer scheme guarding bulk sync
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ActionItemPatchSchema, ActionItemSchema, ActivityEntrySchema, DraftRejectionSchema,
    DraftSchema, ErrorCodeSchema, ErrorSchema, InboxStatusPatchSchema, InboxStatusSchema,
    IssueBoardSchema, NewActivitySchema, PaymentsSnapshotSchema, ScoreReportSchema,
    SyncPayloadSchema, TaskPatchSchema, TaskSchema,
};
use crate::inbound::http::sync::SyncResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the sync bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SyncBearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Shared secret configured through DASHBOARD_SYNC_SECRET.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Command center API",
        description = "Personal operations dashboard with fixture-backed collections and cached upstream feeds."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::complete_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::drafts::list_drafts,
        crate::inbound::http::drafts::send_draft,
        crate::inbound::http::drafts::reject_draft,
        crate::inbound::http::activity::list_activity,
        crate::inbound::http::activity::record_activity,
        crate::inbound::http::inbox::get_inbox_status,
        crate::inbound::http::inbox::update_inbox_status,
        crate::inbound::http::action_items::list_action_items,
        crate::inbound::http::action_items::complete_action_item,
        crate::inbound::http::action_items::update_action_item,
        crate::inbound::http::sync::sync_collections,
        crate::inbound::http::external::get_issue_board,
        crate::inbound::http::external::get_scores,
        crate::inbound::http::external::get_payments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TaskSchema,
        TaskPatchSchema,
        DraftSchema,
        DraftRejectionSchema,
        ActivityEntrySchema,
        NewActivitySchema,
        InboxStatusSchema,
        InboxStatusPatchSchema,
        ActionItemSchema,
        ActionItemPatchSchema,
        SyncPayloadSchema,
        SyncResponse,
        IssueBoardSchema,
        ScoreReportSchema,
        PaymentsSnapshotSchema,
    )),
    tags(
        (name = "tasks", description = "Shared task list"),
        (name = "drafts", description = "Outbound message drafts awaiting review"),
        (name = "activity", description = "Recent activity feed"),
        (name = "inbox", description = "Inbox triage status"),
        (name = "action-items", description = "Cross-source action items"),
        (name = "sync", description = "Bulk collection replacement"),
        (name = "feeds", description = "Cached upstream feeds"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
