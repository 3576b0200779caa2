//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the port traits, so
//! tests can plug in mocks or in-memory stores.

use std::sync::Arc;

use crate::domain::ports::{TaskRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { users, tasks }
    }
}
