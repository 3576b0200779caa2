//! Parsing helpers for path and query parameters.

use crate::domain::{Error, TaskId, UserId};

pub(crate) const INVALID_USER_ID: &str = "Invalid user ID";
pub(crate) const INVALID_TASK_ID: &str = "Invalid task ID";

fn parse_i32(raw: &str, message: &str) -> Result<i32, Error> {
    raw.parse::<i32>()
        .map_err(|_| Error::invalid_request(message))
}

/// Parse a user id path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_i32(raw, INVALID_USER_ID).map(UserId::new)
}

/// Parse a task id path segment.
pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    parse_i32(raw, INVALID_TASK_ID).map(TaskId::new)
}

/// Parse the optional `user_id` filter. Absent or empty means all users.
pub(crate) fn parse_user_filter(raw: Option<&str>) -> Result<i32, Error> {
    match raw {
        None | Some("") => Ok(0),
        Some(value) => parse_i32(value, INVALID_USER_ID),
    }
}

/// Lenient integer parsing for paging parameters: anything unparsable is 0.
pub(crate) fn lenient_i64(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0)
}
