use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use movieapp_api_schema::embedded::{self, LikedBy, MovieEntries, ReviewEntries};
use movieapp_api_schema::{reviews, users};
use movieapp_domain::collection::ListKind;
use movieapp_domain::pagination::PageRequest;
use movieapp_domain::rating::Rating;

use crate::domain::repository::{PublishedReviewRepository, UserRepository};
use crate::domain::types::{MovieEntry, PublishedReview, ReviewEntry, User};
use crate::error::ApiError;

/// Map a failed UPDATE: no matching row becomes `missing`, anything else is internal.
fn update_error(e: DbErr, missing: ApiError, context: &'static str) -> ApiError {
    match e {
        DbErr::RecordNotUpdated => missing,
        e => ApiError::Internal(anyhow::Error::new(e).context(context)),
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn stored_rating(value: i16) -> Result<Rating, ApiError> {
    Rating::try_from(i64::from(value))
        .context("stored rating out of range")
        .map_err(ApiError::Internal)
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            avatar: Set(user.avatar.clone()),
            watchlist: Set(movie_entries(&user.watchlist)),
            favorites: Set(movie_entries(&user.favorites)),
            reviews: Set(review_entries(&user.reviews)),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::EmailAlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = name {
            am.name = Set(name.to_owned());
        }
        if let Some(email) = email {
            am.email = Set(email.to_owned());
        }
        if let Some(avatar) = avatar {
            am.avatar = Set(avatar.to_owned());
        }
        am.updated_at = Set(Utc::now());

        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::EmailAlreadyRegistered),
            Err(e) => Err(update_error(e, ApiError::UserNotFound, "update user profile")),
        }
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, ApiError::UserNotFound, "update password hash"))?;
        Ok(())
    }

    async fn save_list(
        &self,
        id: Uuid,
        kind: ListKind,
        entries: &[MovieEntry],
    ) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        match kind {
            ListKind::Watchlist => am.watchlist = Set(movie_entries(entries)),
            ListKind::Favorites => am.favorites = Set(movie_entries(entries)),
        }
        am.update(&self.db)
            .await
            .map_err(|e| update_error(e, ApiError::UserNotFound, "save user list"))?;
        Ok(())
    }

    async fn save_reviews(&self, id: Uuid, reviews: &[ReviewEntry]) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            reviews: Set(review_entries(reviews)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, ApiError::UserNotFound, "save user reviews"))?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let reviews = model
        .reviews
        .0
        .into_iter()
        .map(|r| {
            Ok(ReviewEntry {
                movie_id: r.movie_id,
                movie_title: r.movie_title,
                rating: stored_rating(r.rating)?,
                comment: r.comment,
                created_at: r.created_at,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        avatar: model.avatar,
        watchlist: model.watchlist.0.into_iter().map(movie_from_stored).collect(),
        favorites: model.favorites.0.into_iter().map(movie_from_stored).collect(),
        reviews,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn movie_from_stored(e: embedded::MovieEntry) -> MovieEntry {
    MovieEntry {
        movie_id: e.movie_id,
        title: e.title,
        poster: e.poster,
        added_at: e.added_at,
    }
}

fn movie_entries(entries: &[MovieEntry]) -> MovieEntries {
    MovieEntries(
        entries
            .iter()
            .map(|e| embedded::MovieEntry {
                movie_id: e.movie_id,
                title: e.title.clone(),
                poster: e.poster.clone(),
                added_at: e.added_at,
            })
            .collect(),
    )
}

fn review_entries(reviews: &[ReviewEntry]) -> ReviewEntries {
    ReviewEntries(
        reviews
            .iter()
            .map(|r| embedded::ReviewEntry {
                movie_id: r.movie_id,
                movie_title: r.movie_title.clone(),
                rating: i16::from(r.rating.get()),
                comment: r.comment.clone(),
                created_at: r.created_at,
            })
            .collect(),
    )
}

// ── Published review repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPublishedReviewRepository {
    pub db: DatabaseConnection,
}

impl PublishedReviewRepository for DbPublishedReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PublishedReview>, ApiError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        model.map(review_from_model).transpose()
    }

    async fn find_by_user_and_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
    ) -> Result<Option<PublishedReview>, ApiError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .filter(reviews::Column::MovieId.eq(movie_id))
            .one(&self.db)
            .await
            .context("find review by user and movie")?;
        model.map(review_from_model).transpose()
    }

    async fn create(&self, review: &PublishedReview) -> Result<(), ApiError> {
        let result = reviews::ActiveModel {
            id: Set(review.id),
            user_id: Set(review.user_id),
            movie_id: Set(review.movie_id),
            movie_title: Set(review.movie_title.clone()),
            movie_poster: Set(review.movie_poster.clone()),
            rating: Set(i16::from(review.rating.get())),
            comment: Set(review.comment.clone()),
            liked_by: Set(LikedBy(review.liked_by.clone())),
            is_public: Set(review.is_public),
            created_at: Set(review.created_at),
            updated_at: Set(review.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Lost a race with a concurrent publish for the same movie.
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyReviewed),
            Err(e) => Err(anyhow::Error::new(e).context("create review").into()),
        }
    }

    async fn update(&self, review: &PublishedReview) -> Result<(), ApiError> {
        reviews::ActiveModel {
            id: Set(review.id),
            movie_title: Set(review.movie_title.clone()),
            movie_poster: Set(review.movie_poster.clone()),
            rating: Set(i16::from(review.rating.get())),
            comment: Set(review.comment.clone()),
            is_public: Set(review.is_public),
            updated_at: Set(review.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, ApiError::ReviewNotFound, "update review"))?;
        Ok(())
    }

    async fn list_public_by_movie(
        &self,
        movie_id: i32,
        page: PageRequest,
    ) -> Result<Vec<PublishedReview>, ApiError> {
        let page = page.clamped();
        let models = reviews::Entity::find()
            .filter(reviews::Column::MovieId.eq(movie_id))
            .filter(reviews::Column::IsPublic.eq(true))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list public reviews by movie")?;
        models.into_iter().map(review_from_model).collect()
    }

    async fn set_liked_by(&self, id: Uuid, liked_by: &[Uuid]) -> Result<(), ApiError> {
        reviews::ActiveModel {
            id: Set(id),
            liked_by: Set(LikedBy(liked_by.to_vec())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(e, ApiError::ReviewNotFound, "set review likes"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let result = reviews::Entity::delete_many()
            .filter(reviews::Column::Id.eq(id))
            .filter(reviews::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }
}

fn review_from_model(model: reviews::Model) -> Result<PublishedReview, ApiError> {
    Ok(PublishedReview {
        id: model.id,
        user_id: model.user_id,
        movie_id: model.movie_id,
        movie_title: model.movie_title,
        movie_poster: model.movie_poster,
        rating: stored_rating(model.rating)?,
        comment: model.comment,
        liked_by: model.liked_by.0,
        is_public: model.is_public,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
