//! Activity log HTTP handlers.
//!
//! ```text
//! GET  /api/activity
//! POST /api/activity {"text":"...","icon":"📧"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::NewActivity;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ActivityEntrySchema, ErrorSchema, NewActivitySchema};
use crate::inbound::http::state::HttpState;

/// List the activity log, newest first.
#[utoipa::path(
    get,
    path = "/api/activity",
    responses(
        (
            status = 200,
            description = "Activity log",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [ActivityEntrySchema]
        )
    ),
    tags = ["activity"],
    operation_id = "listActivity"
)]
#[get("/activity")]
pub async fn list_activity(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(state.dashboard.activity())
}

/// Prepend an entry to the activity log.
#[utoipa::path(
    post,
    path = "/api/activity",
    request_body = NewActivitySchema,
    responses(
        (status = 201, description = "Recorded entry", body = ActivityEntrySchema),
        (status = 400, description = "Missing or blank text", body = ErrorSchema)
    ),
    tags = ["activity"],
    operation_id = "recordActivity"
)]
#[post("/activity")]
pub async fn record_activity(
    state: web::Data<HttpState>,
    payload: web::Json<NewActivity>,
) -> ApiResult<HttpResponse> {
    let entry = state.dashboard.record_activity(payload.into_inner())?;
    Ok(HttpResponse::Created().json(entry))
}
