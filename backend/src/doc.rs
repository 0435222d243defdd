//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API. The
//! document is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::api::error::ErrorMessage;
use crate::api::users::{
    PostDto, UserDto, UserEnvelope, UserPayload, UserWithPostsDto, UsersEnvelope,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster backend API",
        description = "HTTP interface for the users directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::update_user,
    ),
    components(schemas(
        UserPayload,
        UserDto,
        PostDto,
        UserWithPostsDto,
        UserEnvelope,
        UsersEnvelope,
        ErrorMessage,
    )),
    tags(
        (name = "users", description = "User directory operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! The generated document must cover every routed operation.

    use super::*;

    #[test]
    fn document_lists_the_three_operations() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        let users_path = paths.get("/api/users").expect("users path documented");
        assert!(users_path.get.is_some());
        assert!(users_path.post.is_some());
        assert!(users_path.put.is_some());
    }
}
