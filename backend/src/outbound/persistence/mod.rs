//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository port backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling. Row structs and schema definitions stay internal;
//! only domain types cross the module boundary.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
