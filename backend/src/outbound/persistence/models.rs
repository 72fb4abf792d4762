//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! cross the port boundary; adapters convert them into validated domain
//! types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{publications, users, votes};

/// Row struct for reading from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
}

/// Insertable struct for creating user records.
///
/// The database assigns `id` and `created_at`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
}

/// Row struct for reading from the `publications` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = publications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PublicationRow {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_id: i32,
}

/// Insertable struct for creating publication records.
///
/// The database assigns `id` and both timestamps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = publications)]
pub(crate) struct NewPublicationRow<'a> {
    pub content: &'a str,
    pub creator_id: i32,
}

/// Row struct for reading from the `votes` table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: i32,
    pub publication_id: i32,
    pub user_id: i32,
    pub grade: bool,
}

/// Insertable struct for casting votes.
///
/// The database assigns `id`.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub publication_id: i32,
    pub user_id: i32,
    pub grade: bool,
}
