//! Bulk sync HTTP handler.
//!
//! ```text
//! POST /api/sync  Authorization: Bearer <secret>
//!      {"tasks":[...],"inboxStatus":{...}}
//! ```
//!
//! Only the collections present as keys are replaced. The token is checked
//! before the body is decoded so unauthenticated callers learn nothing about
//! the payload shape.

use actix_web::{HttpRequest, post, web};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, SyncPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::authorize_sync;
use crate::inbound::http::schemas::{ErrorSchema, SyncPayloadSchema};
use crate::inbound::http::state::HttpState;

/// Response payload for `POST /api/sync`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    pub ok: bool,
    /// Collection keys that were replaced, in a fixed order.
    #[schema(example = json!(["tasks", "inboxStatus"]))]
    pub synced: Vec<&'static str>,
}

/// Replace whole collections in one call.
#[utoipa::path(
    post,
    path = "/api/sync",
    request_body = SyncPayloadSchema,
    responses(
        (status = 200, description = "Collections replaced", body = SyncResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 401, description = "Missing or wrong bearer token", body = ErrorSchema),
        (status = 503, description = "Sync secret not configured", body = ErrorSchema)
    ),
    tags = ["sync"],
    operation_id = "syncCollections",
    security(("SyncBearer" = []))
)]
#[post("/sync")]
pub async fn sync_collections(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<SyncResponse>> {
    authorize_sync(state.sync_secret.as_ref(), &request)?;
    let payload: SyncPayload = serde_json::from_slice(&body).map_err(|err| {
        Error::invalid_request("sync body must be a JSON object of collections")
            .with_details(json!({ "reason": err.to_string() }))
    })?;
    let synced = state.dashboard.sync(payload);
    Ok(web::Json(SyncResponse { ok: true, synced }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InboxStatus;
    use crate::inbound::http::auth::SyncSecret;
    use crate::inbound::http::test_utils::{offline_ports, seeded_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;
    use zeroize::Zeroizing;

    fn secret() -> Option<SyncSecret> {
        SyncSecret::new(Zeroizing::new("s3cret".to_owned()))
    }

    fn sync_request(token: Option<&str>, body: Value) -> actix_http::Request {
        let mut request = actix_test::TestRequest::post()
            .uri("/api/sync")
            .set_json(body);
        if let Some(token) = token {
            request = request.insert_header(("Authorization", format!("Bearer {token}")));
        }
        request.to_request()
    }

    #[rstest]
    #[actix_web::test]
    async fn replaces_only_present_collections() {
        let (state, store, _clock) = seeded_state(offline_ports());
        let tasks_before = store.tasks();
        let app = actix_test::init_service(test_app(state.with_sync_secret(secret()))).await;

        let body = json!({
            "inboxStatus": {"lastReviewed": null, "pendingCount": 9, "urgentCount": 2},
            "drafts": [],
            "unexpected": true
        });
        let response = actix_test::call_service(&app, sync_request(Some("s3cret"), body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload, json!({"ok": true, "synced": ["drafts", "inboxStatus"]}));
        assert!(store.drafts().is_empty());
        assert_eq!(
            store.inbox_status(),
            InboxStatus {
                last_reviewed: None,
                pending_count: 9,
                urgent_count: 2,
            }
        );
        assert_eq!(store.tasks(), tasks_before);
    }

    #[rstest]
    #[case::wrong_token(Some("nope"))]
    #[case::no_header(None)]
    #[actix_web::test]
    async fn bad_credentials_change_nothing(#[case] token: Option<&str>) {
        let (state, store, _clock) = seeded_state(offline_ports());
        let before = store.snapshot();
        let app = actix_test::init_service(test_app(state.with_sync_secret(secret()))).await;

        let response =
            actix_test::call_service(&app, sync_request(token, json!({"tasks": []}))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.snapshot(), before);
    }

    #[rstest]
    #[actix_web::test]
    async fn unset_secret_is_service_unavailable() {
        let (state, _store, _clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let response =
            actix_test::call_service(&app, sync_request(Some("s3cret"), json!({}))).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["code"], "not_configured");
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_collections_are_invalid_request() {
        let (state, store, _clock) = seeded_state(offline_ports());
        let before = store.snapshot();
        let app = actix_test::init_service(test_app(state.with_sync_secret(secret()))).await;

        let response = actix_test::call_service(
            &app,
            sync_request(Some("s3cret"), json!({"tasks": [{"id": "x"}]})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.snapshot(), before);
    }
}
