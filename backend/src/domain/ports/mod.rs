//! Driven ports for the storage adapters.
//!
//! Each trait reports failures through a typed error generated by
//! [`define_port_error!`], letting handlers and the accrual loop map them
//! without knowing which adapter is plugged in.

mod macros;
pub(crate) use macros::define_port_error;

mod store_probe;
mod task_repository;
mod user_repository;

#[cfg(test)]
pub use store_probe::MockStoreProbe;
pub use store_probe::{StoreProbe, StoreProbeError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
