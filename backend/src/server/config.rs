//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use taskapi::domain::ports::{TaskRepository, UserRepository};
use taskapi::inbound::http::state::HttpState;
use taskapi::outbound::persistence::{DbPool, DieselTaskRepository, DieselUserRepository};

/// Everything `create_server` needs to build the app factory.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) tasks: Arc<dyn TaskRepository>,
}

impl ServerConfig {
    /// Wire the Diesel adapters over a shared pool.
    #[must_use]
    pub fn from_pool(bind_addr: SocketAddr, pool: &DbPool) -> Self {
        Self {
            bind_addr,
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
        }
    }

    /// Task repository shared with the accrual loop.
    #[must_use]
    pub fn tasks(&self) -> Arc<dyn TaskRepository> {
        Arc::clone(&self.tasks)
    }

    pub(crate) fn http_state(&self) -> HttpState {
        HttpState::new(Arc::clone(&self.users), Arc::clone(&self.tasks))
    }
}
