//! Task HTTP handlers.
//!
//! ```text
//! GET  /api/tasks
//! POST /api/tasks/{id}/complete
//! POST /api/tasks/{id}/update
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Task, TaskPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, TaskPatchSchema, TaskSchema};
use crate::inbound::http::state::HttpState;

/// List every task in store order.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (
            status = 200,
            description = "All tasks",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [TaskSchema]
        )
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(state.dashboard.tasks())
}

/// Mark a task done.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/complete",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Completed task", body = TaskSchema),
        (status = 404, description = "Unknown task", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "completeTask"
)]
#[post("/tasks/{id}/complete")]
pub async fn complete_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Task>> {
    let task = state.dashboard.complete_task(&path.into_inner())?;
    Ok(web::Json(task))
}

/// Overwrite a task's status, priority or title.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/update",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = TaskPatchSchema,
    responses(
        (status = 200, description = "Updated task", body = TaskSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown task", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[post("/tasks/{id}/update")]
pub async fn update_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TaskPatch>,
) -> ApiResult<web::Json<Task>> {
    let task = state
        .dashboard
        .update_task(&path.into_inner(), payload.into_inner())?;
    Ok(web::Json(task))
}
