//! HTTP adapter mapping for domain errors.
//!
//! Failures are returned as `text/plain` with the raw message as the body.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::{error, info};

use crate::domain::ports::{TaskPersistenceError, UserPersistenceError};
use crate::domain::{Error, ErrorCode, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        if self.code() == ErrorCode::InternalError {
            error!(code = self.code().as_str(), trace_id, message = self.message(), "request failed");
        } else {
            info!(code = self.code().as_str(), trace_id, message = self.message(), "request rejected");
        }
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.message().to_owned())
    }
}

/// Every user store failure, including a missing row, is a server error.
pub(crate) fn map_user_error(err: UserPersistenceError) -> Error {
    Error::internal(err.to_string())
}

/// A missing owner is the client's fault; everything else is ours.
pub(crate) fn map_task_error(err: TaskPersistenceError) -> Error {
    match err {
        TaskPersistenceError::UserNotFound => Error::invalid_request(err.to_string()),
        other => Error::internal(other.to_string()),
    }
}

/// Body decode failures answer 400 with the decoder's message.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(err.to_string()).into()
}

pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(err.to_string()).into()
}
