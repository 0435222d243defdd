//! User and post domain models.
//!
//! Inputs are validated at construction so the rest of the crate only ever
//! handles well-formed values. Serde conversions go through the fallible
//! constructors, keeping deserialised data under the same rules.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a user name.
pub const NAME_MIN: usize = 3;

/// Validation errors returned when constructing user domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email is empty after trimming whitespace.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email does not look like an address.
    #[error("email is not a valid address")]
    InvalidEmail,
    /// Name is shorter than the minimum length.
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only; deliverability is out of scope.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address identifying a user.
///
/// # Examples
/// ```
/// use roster_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("ada@example.com").expect("valid address");
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        let EmailAddress(raw) = value;
        raw
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable name for the user.
///
/// Length is the only rule: at least [`NAME_MIN`] characters, whitespace
/// included. Content is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.chars().count() < NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: NAME_MIN });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        let UserName(raw) = value;
        raw
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is unique across all users and immutable once set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    /// Unique address the user registered with.
    pub email: EmailAddress,
    /// Display name; the only mutable field.
    pub name: UserName,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Post authored by a user. Read-only in this service; the shape is owned by
/// the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Stable post identifier.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Optional post body.
    pub body: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// User together with their eagerly loaded posts, as returned by listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithPosts {
    /// The user record.
    pub user: User,
    /// Posts authored by the user, oldest first. Empty when none exist.
    pub posts: Vec<Post>,
}

/// Validated payload for creating a user.
///
/// # Examples
/// ```
/// use roster_backend::domain::NewUser;
///
/// let new_user = NewUser::try_from_parts("ada@example.com", "Ada").expect("valid");
/// assert_eq!(new_user.email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Address the user registers with.
    pub email: EmailAddress,
    /// Initial display name.
    pub name: UserName,
}

impl NewUser {
    /// Validate both fields and construct a [`NewUser`].
    pub fn try_from_parts(email: &str, name: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            name: UserName::new(name)?,
        })
    }
}
