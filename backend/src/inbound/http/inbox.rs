//! Inbox status HTTP handlers.
//!
//! ```text
//! GET  /api/inbox-status
//! POST /api/inbox-status {"pendingCount":0,"lastReviewed":"2026-01-28T18:15:00Z"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{InboxStatus, InboxStatusPatch};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, InboxStatusPatchSchema, InboxStatusSchema};
use crate::inbound::http::state::HttpState;

/// Read the inbox status singleton.
#[utoipa::path(
    get,
    path = "/api/inbox-status",
    responses(
        (
            status = 200,
            description = "Inbox status",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = InboxStatusSchema
        )
    ),
    tags = ["inbox"],
    operation_id = "getInboxStatus"
)]
#[get("/inbox-status")]
pub async fn get_inbox_status(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(state.dashboard.inbox_status())
}

/// Overwrite the inbox status fields present in the body.
#[utoipa::path(
    post,
    path = "/api/inbox-status",
    request_body = InboxStatusPatchSchema,
    responses(
        (status = 200, description = "Updated inbox status", body = InboxStatusSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema)
    ),
    tags = ["inbox"],
    operation_id = "updateInboxStatus"
)]
#[post("/inbox-status")]
pub async fn update_inbox_status(
    state: web::Data<HttpState>,
    payload: web::Json<InboxStatusPatch>,
) -> web::Json<InboxStatus> {
    web::Json(state.dashboard.update_inbox_status(payload.into_inner()))
}
