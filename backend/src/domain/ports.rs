//! Domain ports defining the persistence edge.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::{EmailAddress, NewUser, User, UserName, UserWithPosts};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// Insert collided with the unique index on `email`.
    #[error("a user with email {email} already exists")]
    DuplicateEmail { email: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-email error for the given address.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Port for durable user storage.
///
/// The service issues at most one outstanding call at a time per request;
/// serialising conflicting writes is the adapter's concern.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch all users with their posts eagerly loaded.
    async fn list_with_posts(&self) -> Result<Vec<UserWithPosts>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user and return the stored record.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Update the name of the user matching `email` and return the stored
    /// record.
    async fn update_name(
        &self,
        email: &EmailAddress,
        name: &UserName,
    ) -> Result<User, UserPersistenceError>;
}
