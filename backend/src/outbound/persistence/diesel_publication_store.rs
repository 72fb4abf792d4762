//! PostgreSQL-backed `PublicationStore` implementation using Diesel.
//!
//! Creation is a plain insert; the rated listing folds the vote table into
//! per-publication aggregates with a raw SQL query because Diesel's DSL
//! cannot express the grouped subquery join.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Text, Timestamptz};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PublicationStore, PublicationStoreError};
use crate::domain::{
    Content, ListingOptions, NewPublication, OrderBy, Publication, PublicationId, RatedPublication,
    User,
};

use super::diesel_basic_error_mapping;
use super::models::{NewPublicationRow, PublicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::publications;

/// Diesel-backed implementation of the publication store port.
#[derive(Clone)]
pub struct DieselPublicationStore {
    pool: DbPool,
}

impl DieselPublicationStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PublicationStoreError {
    diesel_basic_error_mapping::map_pool_error(error, PublicationStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PublicationStoreError {
    diesel_basic_error_mapping::map_diesel_error(
        error,
        PublicationStoreError::query,
        PublicationStoreError::connection,
    )
}

/// Listing body shared by every sort order.
///
/// The vote subquery groups the ledger per publication into a total count
/// and a signed rating; the left join keeps vote-less publications in the
/// result with both aggregates coalesced to zero. The creator join is
/// inner: the foreign key guarantees it resolves, and a dangling
/// `creator_id` would drop the row from the listing rather than fail it.
const LISTING_SQL: &str = "\
SELECT
    p.id,
    p.content,
    p.created_at,
    COALESCE(v.rating, 0) AS rating,
    COALESCE(v.vote_count, 0) AS vote_count,
    u.id AS creator_id,
    u.username AS creator_username
FROM publications AS p
INNER JOIN users AS u ON u.id = p.creator_id
LEFT JOIN (
    SELECT
        publication_id,
        COUNT(publication_id) AS vote_count,
        SUM(CASE WHEN grade THEN 1 ELSE -1 END) AS rating
    FROM votes
    GROUP BY publication_id
) AS v ON v.publication_id = p.id";

/// Sort clause for the requested ordering.
///
/// The match is exhaustive over [`OrderBy`] so a new sort key fails to
/// compile until it gets a clause here. Ties break on publication id
/// ascending to keep pagination stable.
fn order_clause(options: ListingOptions) -> &'static str {
    match (options.order_by, options.desc) {
        (OrderBy::Rating, false) => "ORDER BY COALESCE(v.rating, 0) ASC, p.id ASC",
        (OrderBy::Rating, true) => "ORDER BY COALESCE(v.rating, 0) DESC, p.id ASC",
        (OrderBy::CreatedAt, false) => "ORDER BY p.created_at ASC, p.id ASC",
        (OrderBy::CreatedAt, true) => "ORDER BY p.created_at DESC, p.id ASC",
    }
}

/// Full listing statement; `$1` is the row cap, `NULL` meaning unbounded.
fn listing_sql(options: ListingOptions) -> String {
    format!("{LISTING_SQL}\n{}\nLIMIT $1", order_clause(options))
}

/// Raw result row for the rated listing query.
#[derive(Debug, QueryableByName)]
struct RatedPublicationRow {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Text)]
    content: String,
    #[diesel(sql_type = Timestamptz)]
    created_at: DateTime<Utc>,
    #[diesel(sql_type = BigInt)]
    rating: i64,
    #[diesel(sql_type = BigInt)]
    vote_count: i64,
    #[diesel(sql_type = Integer)]
    creator_id: i32,
    #[diesel(sql_type = Text)]
    creator_username: String,
}

/// Convert a stored publication row into a validated domain publication.
fn row_to_publication(row: PublicationRow) -> Result<Publication, PublicationStoreError> {
    let id = PublicationId::new(row.id)
        .map_err(|err| PublicationStoreError::query(format!("stored publication: {err}")))?;
    let content = Content::new(row.content)
        .map_err(|err| PublicationStoreError::query(format!("stored publication {id}: {err}")))?;
    let creator_id = row
        .creator_id
        .try_into()
        .map_err(|err| PublicationStoreError::query(format!("stored publication {id}: {err}")))?;

    Ok(Publication {
        id,
        content,
        creator_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Convert a listing result row into a validated rated publication.
fn row_to_rated(row: RatedPublicationRow) -> Result<RatedPublication, PublicationStoreError> {
    let id = PublicationId::new(row.id)
        .map_err(|err| PublicationStoreError::query(format!("listed publication: {err}")))?;
    let content = Content::new(row.content)
        .map_err(|err| PublicationStoreError::query(format!("listed publication {id}: {err}")))?;
    let creator = User::try_from_parts(row.creator_id, row.creator_username).map_err(|err| {
        PublicationStoreError::query(format!("creator of publication {id}: {err}"))
    })?;

    Ok(RatedPublication {
        id,
        content,
        created_at: row.created_at,
        rating: row.rating,
        vote_count: row.vote_count,
        creator,
    })
}

#[async_trait]
impl PublicationStore for DieselPublicationStore {
    async fn create(&self, draft: NewPublication) -> Result<Publication, PublicationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPublicationRow {
            content: draft.content.as_ref(),
            creator_id: draft.creator_id.get(),
        };

        let row = diesel::insert_into(publications::table)
            .values(&new_row)
            .returning(PublicationRow::as_returning())
            .get_result::<PublicationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_publication(row)
    }

    async fn list_with_ratings(
        &self,
        options: ListingOptions,
    ) -> Result<Vec<RatedPublication>, PublicationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RatedPublicationRow> = sql_query(listing_sql(options))
            .bind::<Nullable<BigInt>, _>(options.row_cap())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_rated).collect()
    }
}
