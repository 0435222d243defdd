//! Use-case service for the user resource.
//!
//! Holds the repository port behind an injected `Arc` so HTTP handlers stay
//! free of persistence details and tests can substitute an in-memory fake.

use std::sync::Arc;

use thiserror::Error;

use super::ports::{UserPersistenceError, UserRepository};
use super::{EmailAddress, NewUser, User, UserName, UserWithPosts};

/// Failures surfaced by [`UsersService`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserServiceError {
    /// A user with the requested email already exists.
    #[error("a user with this email already exists")]
    AlreadyExists,
    /// No user with the requested email exists.
    #[error("no user with this email exists")]
    NotFound,
    /// The repository failed while serving the request.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Application service coordinating user reads and writes.
///
/// Each operation is a single-pass check-then-act flow with no retries. The
/// existence checks are not transactional with the following write; the
/// database unique index on `email` is the authoritative guard for racing
/// creates (see [`UsersService::create`]).
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// List all users with their posts eagerly loaded.
    pub async fn list(&self) -> Result<Vec<UserWithPosts>, UserServiceError> {
        Ok(self.repository.list_with_posts().await?)
    }

    /// Create a user after checking the email is not taken.
    ///
    /// # Errors
    /// Returns [`UserServiceError::AlreadyExists`] when the email is already
    /// registered, either at the existence check or when a concurrent create
    /// wins the race and the insert hits the unique index.
    pub async fn create(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        if self
            .repository
            .find_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(UserServiceError::AlreadyExists);
        }

        match self.repository.insert(&new_user).await {
            Ok(user) => Ok(user),
            Err(UserPersistenceError::DuplicateEmail { .. }) => {
                Err(UserServiceError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Update the name of the user registered under `email`.
    ///
    /// Only `name` changes; the email is immutable once set.
    ///
    /// # Errors
    /// Returns [`UserServiceError::NotFound`] when no user matches the email.
    pub async fn rename(
        &self,
        email: &EmailAddress,
        name: &UserName,
    ) -> Result<User, UserServiceError> {
        if self.repository.find_by_email(email).await?.is_none() {
            return Err(UserServiceError::NotFound);
        }

        Ok(self.repository.update_name(email, name).await?)
    }
}
