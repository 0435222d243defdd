//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Row-to-domain conversion revalidates the
//! stored strings so a corrupted row surfaces as a query error instead of an
//! invalid domain value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{EmailAddress, Post, User, UserName};

use super::schema::{posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert the row into a domain [`User`].
    pub(crate) fn into_domain(self) -> Result<User, UserPersistenceError> {
        let email = EmailAddress::new(self.email)
            .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
        let name = UserName::new(self.name)
            .map_err(|err| UserPersistenceError::query(format!("stored name invalid: {err}")))?;
        Ok(User {
            id: self.id,
            email,
            name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for creating new user records.
///
/// Timestamps are assigned by column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
}

/// Changeset struct for renaming an existing user.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserRenameChangeset<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = posts)]
#[diesel(belongs_to(UserRow, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PostRow {
    /// Convert the row into a domain [`Post`].
    pub(crate) fn into_domain(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
        }
    }
}
