//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Pagination, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// No user row carries the requested identifier.
        NotFound { id: i32 } => "user {id} not found",
    }
}

/// Storage for [`User`] records.
///
/// Updates and deletes that match no row succeed silently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the stored record with its assigned id.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when no such row exists.
    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError>;

    /// List users in store order within the given window.
    async fn list(&self, page: Pagination) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace name and passport of an existing user.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<(), UserPersistenceError>;

    /// Remove a user. Fails if the user still owns tasks.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
