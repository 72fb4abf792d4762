//! Publication listing model.
//!
//! Listings join publications with their creator and fold the vote table
//! into two derived figures: `rating` (up-votes minus down-votes) and
//! `vote_count` (total votes). Publications without votes report zero for
//! both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::publication::{Content, PublicationId};
use super::user::User;

/// Listing limit applied when the caller does not supply one.
pub const DEFAULT_LISTING_LIMIT: u32 = 10;

/// Sort key for publication listings.
///
/// The set is closed: store adapters match on it exhaustively, so adding a
/// variant forces every adapter to handle it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Order by derived rating.
    #[default]
    Rating,
    /// Order by creation timestamp.
    CreatedAt,
}

/// Options controlling a publication listing.
///
/// # Examples
///
/// ```
/// # use tribune_backend::domain::{ListingOptions, OrderBy};
/// let options = ListingOptions::default();
/// assert_eq!(options.order_by, OrderBy::Rating);
/// assert!(!options.desc);
/// assert_eq!(options.row_cap(), Some(10));
///
/// let unbounded = ListingOptions {
///     limit: 0,
///     ..ListingOptions::default()
/// };
/// assert_eq!(unbounded.row_cap(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Sort key.
    pub order_by: OrderBy,
    /// Sort direction: `true` for descending.
    pub desc: bool,
    /// Maximum number of rows, with `0` meaning no limit.
    pub limit: u32,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            order_by: OrderBy::default(),
            desc: false,
            limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl ListingOptions {
    /// Row cap for the store query, or `None` when the listing is unbounded.
    #[must_use]
    pub fn row_cap(self) -> Option<i64> {
        if self.limit == 0 {
            None
        } else {
            Some(i64::from(self.limit))
        }
    }
}

/// A publication row enriched with vote aggregates and its creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedPublication {
    /// Publication identifier.
    pub id: PublicationId,
    /// Body text.
    pub content: Content,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Up-votes minus down-votes; zero when no votes exist.
    pub rating: i64,
    /// Total number of votes; zero when no votes exist.
    pub vote_count: i64,
    /// The publication's author.
    pub creator: User,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[test]
    fn default_options_order_by_rating_ascending_with_limit_ten() {
        let options = ListingOptions::default();
        assert_eq!(options.order_by, OrderBy::Rating);
        assert!(!options.desc);
        assert_eq!(options.limit, DEFAULT_LISTING_LIMIT);
    }

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(1))]
    #[case(10, Some(10))]
    #[case(u32::MAX, Some(i64::from(u32::MAX)))]
    fn row_cap_treats_zero_as_unbounded(#[case] limit: u32, #[case] expected: Option<i64>) {
        let options = ListingOptions {
            limit,
            ..ListingOptions::default()
        };
        assert_eq!(options.row_cap(), expected);
    }

    #[rstest]
    #[case(OrderBy::Rating, "\"rating\"")]
    #[case(OrderBy::CreatedAt, "\"created_at\"")]
    fn order_by_serializes_snake_case(#[case] order_by: OrderBy, #[case] expected: &str) {
        let json = serde_json::to_string(&order_by).expect("serializable");
        assert_eq!(json, expected);
    }

    #[test]
    fn order_by_rejects_unknown_values() {
        let result: Result<OrderBy, _> = serde_json::from_str("\"popularity\"");
        assert!(result.is_err());
    }
}
