//! Draft review HTTP handlers.
//!
//! ```text
//! GET  /api/drafts
//! POST /api/drafts/{id}/send
//! POST /api/drafts/{id}/reject {"note":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::domain::{Draft, DraftRejection, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{DraftRejectionSchema, DraftSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// List every draft in store order.
#[utoipa::path(
    get,
    path = "/api/drafts",
    responses(
        (
            status = 200,
            description = "All drafts",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [DraftSchema]
        )
    ),
    tags = ["drafts"],
    operation_id = "listDrafts"
)]
#[get("/drafts")]
pub async fn list_drafts(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(state.dashboard.drafts())
}

/// Approve a draft for sending.
///
/// Approving an approved draft returns it unchanged.
#[utoipa::path(
    post,
    path = "/api/drafts/{id}/send",
    params(("id" = String, Path, description = "Draft identifier")),
    responses(
        (status = 200, description = "Approved draft", body = DraftSchema),
        (status = 404, description = "Unknown draft", body = ErrorSchema),
        (status = 409, description = "Draft was already rejected", body = ErrorSchema)
    ),
    tags = ["drafts"],
    operation_id = "sendDraft"
)]
#[post("/drafts/{id}/send")]
pub async fn send_draft(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Draft>> {
    let draft = state.dashboard.send_draft(&path.into_inner())?;
    Ok(web::Json(draft))
}

/// Reject a draft with an optional note. An empty body counts as no note.
#[utoipa::path(
    post,
    path = "/api/drafts/{id}/reject",
    params(("id" = String, Path, description = "Draft identifier")),
    request_body(content = Option<DraftRejectionSchema>),
    responses(
        (status = 200, description = "Rejected draft", body = DraftSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown draft", body = ErrorSchema),
        (status = 409, description = "Draft was already approved", body = ErrorSchema)
    ),
    tags = ["drafts"],
    operation_id = "rejectDraft"
)]
#[post("/drafts/{id}/reject")]
pub async fn reject_draft(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<Draft>> {
    let rejection = optional_rejection(&body)?;
    let draft = state.dashboard.reject_draft(&path.into_inner(), rejection)?;
    Ok(web::Json(draft))
}

/// Decode an optional rejection body; a blank body means no note.
fn optional_rejection(body: &[u8]) -> ApiResult<DraftRejection> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DraftRejection::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request("rejection body must be a JSON object")
            .with_details(json!({ "reason": err.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DraftStatus;
    use crate::inbound::http::test_utils::{offline_ports, seeded_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[actix_web::test]
    async fn send_then_reject_is_a_conflict() {
        let (state, store, _clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let send = actix_test::TestRequest::post()
            .uri("/api/drafts/draft-001/send")
            .to_request();
        let response = actix_test::call_service(&app, send).await;
        assert_eq!(response.status(), StatusCode::OK);
        let approved: Draft = actix_test::read_body_json(response).await;
        assert_eq!(approved.status, DraftStatus::Approved);

        let reject = actix_test::TestRequest::post()
            .uri("/api/drafts/draft-001/reject")
            .set_json(json!({"note": "too late"}))
            .to_request();
        let response = actix_test::call_service(&app, reject).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "conflict");

        let stored = store
            .drafts()
            .into_iter()
            .find(|draft| draft.id == "draft-001")
            .expect("draft is seeded");
        assert_eq!(stored, approved);
    }

    #[rstest]
    #[case::with_note(Some(json!({"note": "Tone is off"})), Some("Tone is off"))]
    #[case::empty_object(Some(json!({})), None)]
    #[case::no_body(None, None)]
    #[actix_web::test]
    async fn reject_accepts_optional_note(
        #[case] body: Option<Value>,
        #[case] expected_note: Option<&str>,
    ) {
        let (state, _store, _clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let mut request =
            actix_test::TestRequest::post().uri("/api/drafts/draft-002/reject");
        if let Some(body) = body {
            request = request.set_json(body);
        }
        let response = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let draft: Draft = actix_test::read_body_json(response).await;
        assert_eq!(draft.status, DraftStatus::Rejected);
        assert_eq!(draft.rejection_note.as_deref(), expected_note);
        assert!(draft.rejected_at.is_some());
    }

    #[rstest]
    fn malformed_rejection_body_is_invalid_request() {
        let error = optional_rejection(b"{note").expect_err("not JSON");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_draft_is_not_found() {
        let (state, _store, _clock) = seeded_state(offline_ports());
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/drafts/draft-404/send")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["id"], "draft-404");
    }
}
