//! Domain model and use-case services.
//!
//! Transport-agnostic types and logic. Inbound adapters map these to HTTP;
//! outbound adapters implement the ports against PostgreSQL.

pub mod ports;
pub mod user;
pub mod users_service;

pub use user::{
    EmailAddress, NAME_MIN, NewUser, Post, User, UserName, UserValidationError, UserWithPosts,
};
pub use users_service::{UserServiceError, UsersService};
