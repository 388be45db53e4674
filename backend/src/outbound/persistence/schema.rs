//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// User accounts table.
    ///
    /// `username` and `email` carry UNIQUE constraints; inserts that
    /// violate them are mapped to duplicate-key errors by the repository.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle.
        #[max_length = 64]
        username -> Varchar,
        /// Unique email address, stored lowercased.
        #[max_length = 255]
        email -> Varchar,
        /// Argon2id digest in PHC string form.
        #[max_length = 255]
        password_digest -> Varchar,
        /// Display name of the account holder.
        #[max_length = 128]
        full_name -> Varchar,
        /// Either `student` or `teacher`.
        #[max_length = 16]
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
