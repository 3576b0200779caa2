//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Listings join `users` so each task carries its owner's current name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{
    ActiveTask, NewTask, Task, TaskFilter, TaskId, TaskSort, TaskStatus, UserId,
};

use super::diesel_helpers::{
    is_closed_connection, is_foreign_key_violation, log_diesel_error, map_diesel_error_message,
    map_pool_error_message,
};
use super::models::{ActiveTaskRow, NewTaskRow, TaskListingRow, task_listing_columns};
use super::pool::{DbPool, PoolError};
use super::schema::{tasks, users};

/// Diesel-backed implementation of the [`TaskRepository`] port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    TaskPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    operation: &'static str,
) -> impl Fn(diesel::result::Error) -> TaskPersistenceError {
    move |error| {
        if is_foreign_key_violation(&error) {
            log_diesel_error(&error, operation);
            TaskPersistenceError::user_not_found()
        } else if is_closed_connection(&error) {
            TaskPersistenceError::connection(map_diesel_error_message(error, operation))
        } else {
            TaskPersistenceError::query(map_diesel_error_message(error, operation))
        }
    }
}

/// Unknown tokens are logged and read as pending so one bad row does not
/// break a whole listing.
fn parse_status(task_id: i32, token: &str) -> TaskStatus {
    TaskStatus::from_token(token).unwrap_or_else(|err| {
        warn!(task_id, error = %err, "unrecognised task status, defaulting to pending");
        TaskStatus::Pending
    })
}

impl From<TaskListingRow> for Task {
    fn from(row: TaskListingRow) -> Self {
        Self {
            id: TaskId::new(row.id),
            user_id: UserId::new(row.user_id),
            owner_name: row.owner_name,
            description: row.description,
            status: parse_status(row.id, &row.status),
            rate: row.rate,
            deadline: row.deadline,
            earned: row.earned,
        }
    }
}

impl From<ActiveTaskRow> for ActiveTask {
    fn from(row: ActiveTaskRow) -> Self {
        Self {
            id: TaskId::new(row.id),
            rate: row.rate,
            earned: row.earned,
            deadline: row.deadline,
        }
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            user_id: task.user_id.get(),
            description: task.description.as_str(),
            status: TaskStatus::Pending.as_token(),
            rate: task.rate,
            deadline: task.deadline,
            earned: 0.0,
        };
        let id: i32 = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(tasks::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("insert task"))?;
        Ok(TaskId::new(id))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        self.list_filtered(TaskFilter {
            user_id: Some(user_id),
            sort: TaskSort::Natural,
        })
        .await
    }

    async fn list_filtered(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tasks::table
            .inner_join(users::table)
            .select(task_listing_columns())
            .into_boxed();
        if let Some(user_id) = filter.user_id {
            query = query.filter(tasks::user_id.eq(user_id.get()));
        }
        if filter.sort == TaskSort::EarnedDesc {
            query = query.order(tasks::earned.desc());
        }
        let rows: Vec<TaskListingRow> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list tasks"))?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn list_active(&self) -> Result<Vec<ActiveTask>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ActiveTaskRow> = tasks::table
            .filter(tasks::status.eq(TaskStatus::Running.as_token()))
            .select(ActiveTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list running tasks"))?;
        Ok(rows.into_iter().map(ActiveTask::from).collect())
    }

    async fn update_earned(
        &self,
        id: TaskId,
        earned: f64,
        deadline: i32,
    ) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(tasks::table.find(id.get()))
            .set((tasks::earned.eq(earned), tasks::deadline.eq(deadline)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("update task earnings"))
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(tasks::table.find(id.get()))
            .set(tasks::status.eq(status.as_token()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("update task status"))
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(tasks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("delete task"))
    }
}
