use chrono::{DateTime, Utc};
use uuid::Uuid;

use movieapp_domain::rating::Rating;

/// Longest comment accepted on a published review.
pub const MAX_COMMENT_LEN: usize = 1000;

/// A user account together with its embedded collections.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercase.
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub watchlist: Vec<MovieEntry>,
    pub favorites: Vec<MovieEntry>,
    pub reviews: Vec<ReviewEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// The user fields safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// A movie saved to a watchlist or favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieEntry {
    pub movie_id: i32,
    pub title: String,
    pub poster: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// A review embedded in the author's own record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A standalone review that can be listed under its movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: i32,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub rating: Rating,
    pub comment: String,
    pub liked_by: Vec<Uuid>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedReview {
    /// Private reviews are only visible to their author.
    pub fn visible_to(&self, user_id: Uuid) -> bool {
        self.is_public || self.user_id == user_id
    }
}

/// Listing endpoints offered by the movie metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieListing {
    Popular,
    TopRated,
    Upcoming,
}

impl MovieListing {
    pub fn path(self) -> &'static str {
        match self {
            Self::Popular => "/movie/popular",
            Self::TopRated => "/movie/top_rated",
            Self::Upcoming => "/movie/upcoming",
        }
    }
}
