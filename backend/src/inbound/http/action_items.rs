//! Action item HTTP handlers.
//!
//! ```text
//! GET  /api/action-items
//! POST /api/action-items/{id}/complete
//! POST /api/action-items/{id}/update {"priority":"high","dueDate":"2026-02-02"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{ActionItem, ActionItemPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ActionItemPatchSchema, ActionItemSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// List every action item in store order.
#[utoipa::path(
    get,
    path = "/api/action-items",
    responses(
        (
            status = 200,
            description = "All action items",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [ActionItemSchema]
        )
    ),
    tags = ["action-items"],
    operation_id = "listActionItems"
)]
#[get("/action-items")]
pub async fn list_action_items(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(state.dashboard.action_items())
}

/// Mark an action item done.
#[utoipa::path(
    post,
    path = "/api/action-items/{id}/complete",
    params(("id" = String, Path, description = "Action item identifier")),
    responses(
        (status = 200, description = "Completed item", body = ActionItemSchema),
        (status = 404, description = "Unknown item", body = ErrorSchema)
    ),
    tags = ["action-items"],
    operation_id = "completeActionItem"
)]
#[post("/action-items/{id}/complete")]
pub async fn complete_action_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionItem>> {
    let item = state.dashboard.complete_action_item(&path.into_inner())?;
    Ok(web::Json(item))
}

/// Overwrite an action item's priority, status or due date.
#[utoipa::path(
    post,
    path = "/api/action-items/{id}/update",
    params(("id" = String, Path, description = "Action item identifier")),
    request_body = ActionItemPatchSchema,
    responses(
        (status = 200, description = "Updated item", body = ActionItemSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown item", body = ErrorSchema)
    ),
    tags = ["action-items"],
    operation_id = "updateActionItem"
)]
#[post("/action-items/{id}/update")]
pub async fn update_action_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ActionItemPatch>,
) -> ApiResult<web::Json<ActionItem>> {
    let item = state
        .dashboard
        .update_action_item(&path.into_inner(), payload.into_inner())?;
    Ok(web::Json(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionPriority, ActionStatus};
    use crate::inbound::http::test_utils::{offline_ports, seeded_state, test_app};
    use crate::test_support::fixture_now;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn completing_twice_keeps_first_completion_time() {
        let (state, _store, clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let first = actix_test::TestRequest::post()
            .uri("/api/action-items/ai-017/complete")
            .to_request();
        let first: ActionItem =
            actix_test::read_body_json(actix_test::call_service(&app, first).await).await;
        clock.advance_seconds(60);
        let second = actix_test::TestRequest::post()
            .uri("/api/action-items/ai-017/complete")
            .to_request();
        let second: ActionItem =
            actix_test::read_body_json(actix_test::call_service(&app, second).await).await;

        assert_eq!(first.status, ActionStatus::Done);
        assert_eq!(second.completed_at, Some(fixture_now()));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_moves_due_date_and_priority() {
        let (state, store, _clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/action-items/ai-010/update")
            .set_json(json!({"priority": "urgent", "dueDate": "2026-02-02"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let item: ActionItem = actix_test::read_body_json(response).await;
        assert_eq!(item.priority, ActionPriority::Urgent);
        assert_eq!(
            Some(item.due_date),
            NaiveDate::from_ymd_opt(2026, 2, 2)
        );
        assert_eq!(item.status, ActionStatus::Pending);
        assert!(store.action_items().contains(&item));
    }

    #[rstest]
    #[case::complete("/api/action-items/ai-999/complete", None)]
    #[case::update("/api/action-items/ai-999/update", Some(json!({"status": "done"})))]
    #[actix_web::test]
    async fn unknown_items_are_not_found(
        #[case] uri: &str,
        #[case] body: Option<serde_json::Value>,
    ) {
        let (state, store, _clock) = seeded_state(offline_ports());
        let before = store.action_items();
        let app = actix_test::init_service(test_app(state)).await;

        let mut request = actix_test::TestRequest::post().uri(uri);
        if let Some(body) = body {
            request = request.set_json(body);
        }
        let response = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.action_items(), before);
    }
}
