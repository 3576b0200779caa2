//! HTTP inbound adapter exposing the REST endpoints under `/api`.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod tasks;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// Body decoding that ignores `Content-Type` and reports failures as 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(error::json_error_handler)
}

/// Register every `/api` endpoint plus the body and query decode handlers.
///
/// JSON bodies are decoded whatever their `Content-Type` says.
///
/// Mount inside a scope:
///
/// ```ignore
/// App::new().service(web::scope("/api").configure(configure_api))
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::list_users)
        .service(users::get_user)
        .service(users::list_user_tasks)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(tasks::list_tasks)
        .service(tasks::create_task)
        .service(tasks::start_task)
        .service(tasks::stop_task)
        .service(tasks::task_item_resource());
}
