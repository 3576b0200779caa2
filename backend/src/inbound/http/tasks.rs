//! Task endpoints.
//!
//! ```text
//! GET    /api/tasks?user_id=1&sort_by=earned
//! POST   /api/tasks             {"userID":1,"description":"…","rate":3600,"deadline":5}
//! POST   /api/tasks/{id}/start
//! POST   /api/tasks/{id}/stop
//! DELETE /api/tasks/{id}
//! ```

use actix_web::{HttpResponse, Resource, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewTask, Task, TaskFilter, TaskSort, TaskStatus, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_task_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_task_id, parse_user_filter};

/// Body for creating a task.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateTaskRequest {
    #[serde(rename = "userID")]
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "Prepare quarterly report")]
    pub description: String,
    /// Currency units per hour.
    #[schema(example = 3600)]
    pub rate: i32,
    /// Accrual ticks before earnings freeze.
    #[schema(example = 5)]
    pub deadline: i32,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(value: CreateTaskRequest) -> Self {
        Self {
            user_id: UserId::new(value.user_id),
            description: value.description,
            rate: value.rate,
            deadline: value.deadline,
        }
    }
}

/// Filters for the task listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Owner to filter by; absent or 0 lists every user's tasks.
    #[param(value_type = Option<i32>)]
    pub user_id: Option<String>,
    /// `earned` orders by earnings, highest first. Other values are ignored.
    pub sort_by: Option<String>,
}

impl ListTasksQuery {
    fn filter(&self) -> Result<TaskFilter, Error> {
        let user_id = parse_user_filter(self.user_id.as_deref())?;
        Ok(TaskFilter::new(
            user_id,
            TaskSort::from_query(self.sort_by.as_deref()),
        ))
    }
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Matching tasks", body = [Task]),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    query: web::Query<ListTasksQuery>,
) -> ApiResult<web::Json<Vec<Task>>> {
    let filter = query.filter()?;
    debug!(user_id = ?filter.user_id, sort = ?filter.sort, "listing tasks");
    let tasks = state
        .tasks
        .list_filtered(filter)
        .await
        .map_err(map_task_error)?;
    info!(count = tasks.len(), "tasks listed");
    Ok(web::Json(tasks))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created in pending state"),
        (status = 400, description = "Malformed body or unknown user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let task = NewTask::from(payload.into_inner());
    let id = state.tasks.create(&task).await.map_err(map_task_error)?;
    info!(task_id = %id, user_id = %task.user_id, "task created");
    Ok(HttpResponse::Created().finish())
}

async fn set_status(state: &HttpState, raw_id: &str, status: TaskStatus) -> ApiResult<HttpResponse> {
    let id = parse_task_id(raw_id)?;
    state
        .tasks
        .update_status(id, status)
        .await
        .map_err(map_task_error)?;
    info!(task_id = %id, %status, "task status changed");
    Ok(HttpResponse::Ok().finish())
}

/// Mark a task running, whatever its current state.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/start",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task is running"),
        (status = 400, description = "Invalid task ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["tasks"],
    operation_id = "startTask"
)]
#[post("/tasks/{id}/start")]
pub async fn start_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    set_status(&state, &path, TaskStatus::Running).await
}

/// Mark a task finished, whatever its current state.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/stop",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task is finished"),
        (status = 400, description = "Invalid task ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["tasks"],
    operation_id = "stopTask"
)]
#[post("/tasks/{id}/stop")]
pub async fn stop_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    set_status(&state, &path, TaskStatus::Finished).await
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task removed, or no such task"),
        (status = 400, description = "Invalid task ID", body = String, content_type = "text/plain"),
        (status = 405, description = "Any method other than DELETE", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
pub async fn delete_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_task_id(&path)?;
    state.tasks.delete(id).await.map_err(map_task_error)?;
    info!(task_id = %id, "task deleted");
    Ok(HttpResponse::Ok().finish())
}

async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("Invalid request method"))
}

/// `/tasks/{id}`: DELETE removes the task, every other method gets 405.
pub fn task_item_resource() -> Resource {
    web::resource("/tasks/{id}")
        .route(web::delete().to(delete_task))
        .default_service(web::to(method_not_allowed))
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
