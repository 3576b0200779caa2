//! User endpoints.
//!
//! ```text
//! GET    /api/users?offset=0&limit=10
//! GET    /api/users/{id}
//! GET    /api/users/{id}/tasks
//! POST   /api/users       {"name":"Ann","passportNumber":"1234 567890"}
//! PUT    /api/users/{id}  {"name":"Ann","passportNumber":"1234 567890"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Pagination, Task, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_task_error, map_user_error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{lenient_i64, parse_user_id};

/// Body for creating or replacing a user.
///
/// `passportNumber` carries series and number separated by one space.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequest {
    #[schema(example = "Иван Петров")]
    pub name: String,
    #[schema(example = "1234 567890")]
    pub passport_number: String,
}

impl UserRequest {
    fn into_draft(self) -> Result<UserDraft, Error> {
        UserDraft::parse(self.name, &self.passport_number)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Paging window for the user listing. Unparsable values count as 0.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Rows to skip; negative values are treated as 0.
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
    /// Maximum rows; 0 or absent means no limit.
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

impl ListUsersQuery {
    fn pagination(&self) -> Pagination {
        Pagination::new(
            lenient_i64(self.offset.as_deref()),
            lenient_i64(self.limit.as_deref()),
        )
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users in store order", body = [User]),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let page = query.pagination();
    debug!(offset = page.offset(), limit = ?page.limit(), "listing users");
    let users = state.users.list(page).await.map_err(map_user_error)?;
    info!(count = users.len(), "users listed");
    Ok(web::Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Missing user or store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state.users.find_by_id(id).await.map_err(map_user_error)?;
    info!(user_id = %id, "user fetched");
    Ok(web::Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/tasks",
    params(("id" = i32, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Tasks owned by the user", body = [Task]),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUserTasks"
)]
#[get("/users/{id}/tasks")]
pub async fn list_user_tasks(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Task>>> {
    let id = parse_user_id(&path)?;
    let tasks = state.tasks.list_for_user(id).await.map_err(map_task_error)?;
    info!(user_id = %id, count = tasks.len(), "user tasks listed");
    Ok(web::Json(tasks))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Malformed body or passport", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let user = state.users.create(&draft).await.map_err(map_user_error)?;
    info!(user_id = %user.id, "user created");
    Ok(HttpResponse::Created().finish())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced, or no such user"),
        (status = 400, description = "Invalid id, body or passport", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let draft = payload.into_inner().into_draft()?;
    state.users.update(id, &draft).await.map_err(map_user_error)?;
    info!(user_id = %id, "user updated");
    Ok(HttpResponse::Ok().finish())
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed, or no such user"),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure, including users that still own tasks", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users.delete(id).await.map_err(map_user_error)?;
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::Ok().finish())
}
