//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered users.
    ///
    /// The unique index on `email` is the authoritative uniqueness guarantee;
    /// the service-level existence check only provides the friendly conflict
    /// response.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique email address.
        email -> Varchar,
        /// Display name (minimum three characters, enforced in the domain).
        name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts authored by users. Read-only in this service.
    posts (id) {
        /// Primary key: UUID identifier.
        id -> Uuid,
        /// Authoring user.
        user_id -> Uuid,
        /// Post title.
        title -> Varchar,
        /// Optional post body.
        body -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(posts, users);
