//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Pagination, User, UserDraft, UserId};

use super::diesel_helpers::{is_closed_connection, map_diesel_error_message, map_pool_error_message};
use super::models::{UserFields, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> UserPersistenceError {
    move |error| {
        if is_closed_connection(&error) {
            UserPersistenceError::connection(map_diesel_error_message(error, operation))
        } else {
            UserPersistenceError::query(map_diesel_error_message(error, operation))
        }
    }
}

fn fields(draft: &UserDraft) -> UserFields<'_> {
    UserFields {
        name: draft.name.as_str(),
        passport_series: draft.passport.series(),
        passport_number: draft.passport.number(),
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            passport_series: row.passport_series,
            passport_number: row.passport_number,
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(fields(draft))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("insert user"))?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find user"))?;
        row.map(User::from)
            .ok_or_else(|| UserPersistenceError::not_found(id.get()))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = users::table
            .select(UserRow::as_select())
            .offset(page.offset())
            .into_boxed();
        if let Some(limit) = page.limit() {
            query = query.limit(limit);
        }
        let rows: Vec<UserRow> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list users"))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id.get()))
            .set(fields(draft))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("update user"))
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("delete user"))
    }
}
