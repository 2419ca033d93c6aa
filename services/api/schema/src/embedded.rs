//! Documents embedded in `users` rows as `jsonb` arrays.
//!
//! Each array is read and written as a whole; a mutation replaces the column
//! value in a single UPDATE.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored watchlist or favorites entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    pub movie_id: i32,
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
    pub added_at: chrono::DateTime<chrono::Utc>,
}

/// `users.watchlist` / `users.favorites` column value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MovieEntries(pub Vec<MovieEntry>);

/// Stored review embedded in the user row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// `users.reviews` column value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReviewEntries(pub Vec<ReviewEntry>);

/// `reviews.liked_by` column value: ids of users who liked a review.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LikedBy(pub Vec<Uuid>);
