//! Upstream status feed HTTP handlers.
//!
//! ```text
//! GET /api/issue-board
//! GET /api/scores
//! GET /api/payments
//! ```
//!
//! Each feed is served from its own time-boxed cache. A failed refresh falls
//! back to the last good value; only a feed that never succeeded surfaces an
//! error.

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{private_no_cache_header, public_short_lived_header};
use crate::inbound::http::schemas::{
    ErrorSchema, IssueBoardSchema, PaymentsSnapshotSchema, ScoreReportSchema,
};
use crate::inbound::http::state::HttpState;

/// Bucketed issues for the configured team.
#[utoipa::path(
    get,
    path = "/api/issue-board",
    responses(
        (status = 200, description = "Issues grouped by state", body = IssueBoardSchema),
        (status = 500, description = "Tracker unavailable", body = ErrorSchema),
        (status = 503, description = "Tracker API key not configured", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "getIssueBoard"
)]
#[get("/issue-board")]
pub async fn get_issue_board(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let board = state.issue_board.board().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(board))
}

/// Today's report for the tracked team.
#[utoipa::path(
    get,
    path = "/api/scores",
    responses(
        (
            status = 200,
            description = "Tracked team report",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = ScoreReportSchema
        ),
        (status = 500, description = "Score feed unavailable", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "getScores"
)]
#[get("/scores")]
pub async fn get_scores(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let report = state.scores.report().await?;
    Ok(HttpResponse::Ok()
        .insert_header(public_short_lived_header())
        .json(report))
}

/// Balance, recurring revenue and subscriptions.
#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payments snapshot", body = PaymentsSnapshotSchema),
        (status = 500, description = "Payments processor unavailable", body = ErrorSchema),
        (status = 503, description = "Payments key not configured", body = ErrorSchema)
    ),
    tags = ["feeds"],
    operation_id = "getPayments"
)]
#[get("/payments")]
pub async fn get_payments(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let snapshot = state.payments.snapshot().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(snapshot))
}

#[cfg(test)]
#[path = "external_tests.rs"]
mod tests;
