//! Users API handlers.
//!
//! A single resource path, method-routed:
//!
//! ```text
//! GET  /api/users                      list users with their posts
//! POST /api/users {"email","name"}     create a user
//! PUT  /api/users {"email","name"}     rename the user matching the email
//! ```

use actix_web::{get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult, ErrorMessage};
use crate::domain::{NewUser, Post, User, UserWithPosts, UsersService};

/// Request body accepted by `POST` and `PUT`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Email address; must be syntactically valid.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name; minimum three characters.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl TryFrom<UserPayload> for NewUser {
    type Error = ApiError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.name)
            .map_err(|_| ApiError::invalid_arguments())
    }
}

/// User record as serialised on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.into(),
            name: user.name.into(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Post record as serialised on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    /// Stable post identifier.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Optional post body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
        }
    }
}

/// User with eagerly loaded posts, as returned by listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserWithPostsDto {
    /// The user record.
    #[serde(flatten)]
    pub user: UserDto,
    /// Posts authored by the user; empty array when none exist.
    pub posts: Vec<PostDto>,
}

impl From<UserWithPosts> for UserWithPostsDto {
    fn from(entry: UserWithPosts) -> Self {
        Self {
            user: entry.user.into(),
            posts: entry.posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

/// Envelope for single-user responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    /// The affected user.
    pub data: UserDto,
}

/// Envelope for the listing response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersEnvelope {
    /// Every known user with their posts.
    pub data: Vec<UserWithPostsDto>,
}

/// List all users with their posts eagerly loaded.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Every user with posts", body = UsersEnvelope),
        (status = 500, description = "Unhandled failure")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/api/users")]
pub async fn list_users(service: web::Data<UsersService>) -> ApiResult<web::Json<UsersEnvelope>> {
    let users = service.list().await?;
    Ok(web::Json(UsersEnvelope {
        data: users.into_iter().map(UserWithPostsDto::from).collect(),
    }))
}

/// Create a user after validation and a uniqueness check.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Created user", body = UserEnvelope),
        (status = 409, description = "Invalid body or email already taken", body = ErrorMessage),
        (status = 500, description = "Unhandled failure")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/api/users")]
pub async fn create_user(
    service: web::Data<UsersService>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = service.create(new_user).await?;
    Ok(web::Json(UserEnvelope { data: user.into() }))
}

/// Rename the user registered under the supplied email.
#[utoipa::path(
    put,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelope),
        (status = 409, description = "Invalid body or unknown email", body = ErrorMessage),
        (status = 500, description = "Unhandled failure")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/api/users")]
pub async fn update_user(
    service: web::Data<UsersService>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserEnvelope>> {
    // Both fields revalidate; only the name is written back.
    let NewUser { email, name } = NewUser::try_from(payload.into_inner())?;
    let user = service.rename(&email, &name).await?;
    Ok(web::Json(UserEnvelope { data: user.into() }))
}

#[cfg(test)]
mod tests {
    //! Serialisation contract for the wire DTOs.

    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::{EmailAddress, UserName};

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: EmailAddress::new("ada@example.com").expect("valid email"),
            name: UserName::new("Ada").expect("valid name"),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn listing_flattens_user_fields_next_to_posts() {
        let entry = UserWithPosts {
            user: sample_user(),
            posts: vec![Post {
                id: Uuid::new_v4(),
                title: "Notes".into(),
                body: Some("G".into()),
                created_at: Utc::now(),
            }],
        };

        let value = serde_json::to_value(UserWithPostsDto::from(entry)).expect("serialises");

        assert_eq!(
            value.get("email").and_then(Value::as_str),
            Some("ada@example.com")
        );
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Ada"));
        let posts = value.get("posts").and_then(Value::as_array).expect("posts");
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn empty_posts_serialise_as_an_empty_array() {
        let entry = UserWithPosts {
            user: sample_user(),
            posts: Vec::new(),
        };

        let value = serde_json::to_value(UserWithPostsDto::from(entry)).expect("serialises");

        assert_eq!(
            value.get("posts").and_then(Value::as_array).map(Vec::len),
            Some(0)
        );
    }

    #[test]
    fn invalid_payloads_map_to_the_shared_rejection() {
        let payload = UserPayload {
            email: "not-an-email".into(),
            name: "ab".into(),
        };

        let err = NewUser::try_from(payload).expect_err("payload is invalid");

        assert_eq!(err, ApiError::invalid_arguments());
    }
}
