//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI at `/docs` and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Task, TaskId, User, UserId};
use crate::inbound::http::tasks::CreateTaskRequest;
use crate::inbound::http::users::UserRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task rate API",
        description = "Users, rate-tracked tasks and their accrued earnings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_tasks,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::start_task,
        crate::inbound::http::tasks::stop_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, UserId, UserRequest, Task, TaskId, CreateTaskRequest)),
    tags(
        (name = "users", description = "User records"),
        (name = "tasks", description = "Tasks and their status"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
