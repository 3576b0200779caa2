//! Task data model.
//!
//! Tasks accrue earnings at an hourly `rate` while running. The `deadline`
//! counts remaining accrual ticks rather than a wall-clock instant.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::UserId;

/// Store-assigned task identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(example = 1)]
pub struct TaskId(i32);

impl TaskId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TaskId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a task.
///
/// The store and the API both carry the localized token returned by
/// [`TaskStatus::as_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Created but never started.
    #[default]
    Pending,
    /// Accruing earnings.
    Running,
    /// Stopped explicitly.
    Finished,
}

/// Raised when a stored or submitted status token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status token: {0}")]
pub struct UnknownStatusToken(pub String);

impl TaskStatus {
    /// Token persisted in the `status` column and rendered in JSON.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Pending => "В ожидании",
            Self::Running => "В работе",
            Self::Finished => "Завершена",
        }
    }

    /// Inverse of [`TaskStatus::as_token`].
    ///
    /// # Examples
    /// ```
    /// use taskapi::domain::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::from_token("В работе").unwrap(), TaskStatus::Running);
    /// assert!(TaskStatus::from_token("running").is_err());
    /// ```
    pub fn from_token(token: &str) -> Result<Self, UnknownStatusToken> {
        [Self::Pending, Self::Running, Self::Finished]
            .into_iter()
            .find(|status| status.as_token() == token)
            .ok_or_else(|| UnknownStatusToken(token.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::from_token(&token).map_err(serde::de::Error::custom)
    }
}

/// Task as returned to clients, joined with its owner's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    /// Owner's display name at the time of the query.
    #[serde(rename = "name")]
    #[schema(example = "Иван Петров")]
    pub owner_name: String,
    #[schema(example = "Prepare quarterly report")]
    pub description: String,
    #[schema(value_type = String, example = "В работе")]
    pub status: TaskStatus,
    /// Currency units per hour.
    #[schema(example = 3600)]
    pub rate: i32,
    /// Remaining accrual ticks.
    #[schema(example = 5)]
    pub deadline: i32,
    #[schema(example = 120.5)]
    pub earned: f64,
}

/// Payload for creating a task. New tasks start pending with nothing earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user_id: UserId,
    pub description: String,
    pub rate: i32,
    pub deadline: i32,
}

/// Running task projection consumed by the accrual loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveTask {
    pub id: TaskId,
    pub rate: i32,
    pub earned: f64,
    pub deadline: i32,
}

/// Ordering applied to filtered task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Store order.
    #[default]
    Natural,
    /// Highest `earned` first.
    EarnedDesc,
}

impl TaskSort {
    /// Interpret the `sort_by` query value. Only `earned` is recognised.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("earned") => Self::EarnedDesc,
            _ => Self::Natural,
        }
    }
}

/// Criteria for [`crate::domain::ports::TaskRepository::list_filtered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Restrict to one owner; `None` lists every user's tasks.
    pub user_id: Option<UserId>,
    pub sort: TaskSort,
}

impl TaskFilter {
    /// Build a filter from raw query values. A user id of zero or below
    /// selects all users.
    pub fn new(user_id: i32, sort: TaskSort) -> Self {
        Self {
            user_id: (user_id > 0).then_some(UserId::new(user_id)),
            sort,
        }
    }
}
