//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between Diesel rows and domain
//! types and map failures onto the port error enums. Row structs and table
//! definitions stay private to this module.
//!
//! ```ignore
//! use taskapi::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tasks")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! ```

mod diesel_helpers;
mod diesel_store_probe;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_store_probe::DieselStoreProbe;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
