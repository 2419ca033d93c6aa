use axum::{
    Router,
    routing::{delete, get, post, put},
};

use movieapp_core::health::healthz;
use movieapp_core::middleware::{
    cors_layer, propagate_request_id_layer, request_id_layer, trace_layer,
};

use crate::handlers::{
    auth::{login, me, register},
    collection::{
        add_review, add_to_favorites, add_to_watchlist, get_favorites, get_reviews,
        get_watchlist, remove_from_favorites, remove_from_watchlist,
    },
    health::{api_health, readyz},
    movie::{
        genres, movie_details, movies_by_genre, popular_movies, search_movies, top_rated_movies,
        upcoming_movies,
    },
    profile::{change_password, update_profile},
    review::{delete_review, get_movie_reviews, like_review, publish_review, unlike_review},
};
use crate::state::AppState;

pub fn build_router(state: AppState, frontend_url: &str) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/health", get(api_health))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        // Profile
        .route("/api/users/profile", put(update_profile))
        .route("/api/users/password", put(change_password))
        // Watchlist
        .route("/api/users/watchlist", get(get_watchlist).post(add_to_watchlist))
        .route("/api/users/watchlist/{movie_id}", delete(remove_from_watchlist))
        // Favorites
        .route("/api/users/favorites", get(get_favorites).post(add_to_favorites))
        .route("/api/users/favorites/{movie_id}", delete(remove_from_favorites))
        // Embedded reviews
        .route("/api/users/reviews", get(get_reviews).post(add_review))
        // Published reviews
        .route("/api/reviews", post(publish_review))
        .route("/api/reviews/movie/{movie_id}", get(get_movie_reviews))
        .route("/api/reviews/{id}", delete(delete_review))
        .route("/api/reviews/{id}/like", post(like_review).delete(unlike_review))
        // Movie metadata
        .route("/api/movies/search", get(search_movies))
        .route("/api/movies/popular", get(popular_movies))
        .route("/api/movies/top-rated", get(top_rated_movies))
        .route("/api/movies/upcoming", get(upcoming_movies))
        .route("/api/movies/genres", get(genres))
        .route("/api/movies/genre/{genre_id}", get(movies_by_genre))
        .route("/api/movies/{id}", get(movie_details))
        .with_state(state)
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer(frontend_url))
}
