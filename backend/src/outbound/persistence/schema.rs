//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered dashboard users.
    ///
    /// `username` carries a unique index; inserts that collide fail with a
    /// unique violation instead of overwriting.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Case-sensitive login name.
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Stored file name under the upload directory.
        profile_photo -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
