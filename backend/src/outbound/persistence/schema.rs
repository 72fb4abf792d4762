//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions mirror the migrations under `migrations/` and must stay
//! in lockstep with them; `diesel print-schema` can regenerate this file from
//! a migrated database.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key assigned by the `users_id_seq` sequence.
        id -> Int4,
        /// Unique login name.
        username -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-authored publications.
    publications (id) {
        /// Primary key assigned by the `publications_id_seq` sequence.
        id -> Int4,
        /// Body text; never empty.
        content -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
        /// Authoring user.
        creator_id -> Int4,
    }
}

diesel::table! {
    /// Per-user votes on publications.
    ///
    /// A `(publication_id, user_id)` unique constraint enforces the
    /// one-vote-per-user rule at the database level.
    votes (id) {
        /// Primary key assigned by the `votes_id_seq` sequence.
        id -> Int4,
        /// Voted-on publication.
        publication_id -> Int4,
        /// Voting user.
        user_id -> Int4,
        /// Vote direction: `true` for up, `false` for down.
        grade -> Bool,
    }
}

diesel::joinable!(publications -> users (creator_id));
diesel::joinable!(votes -> publications (publication_id));
diesel::joinable!(votes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, publications, votes);
