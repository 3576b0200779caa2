//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories, readiness probe and embedded
//!   migrations built on Diesel.

pub mod persistence;
