use uuid::Uuid;

use movieapp_api::error::ApiError;
use movieapp_api::usecase::account::{UpdateProfileInput, UpdateProfileUseCase};
use movieapp_api::usecase::collection::{
    AddReviewInput, AddReviewUseCase, AddToListInput, AddToListUseCase, GetListUseCase,
    GetReviewsUseCase, RemoveFromListUseCase,
};
use movieapp_domain::collection::ListKind;

use crate::helpers::{MemUserRepo, StaleReadUserRepo, test_user};

fn inception() -> AddToListInput {
    AddToListInput {
        movie_id: 27205,
        title: "Inception".into(),
        poster: Some("/x.jpg".into()),
    }
}

fn fight_club() -> AddToListInput {
    AddToListInput {
        movie_id: 550,
        title: "Fight Club".into(),
        poster: None,
    }
}

fn review(rating: i64, comment: &str) -> AddReviewInput {
    AddReviewInput {
        movie_id: 27205,
        movie_title: "Inception".into(),
        rating,
        comment: comment.into(),
    }
}

// ── AddToList / GetList ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_round_trip_watchlist_entry_with_server_timestamp() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    let before = chrono::Utc::now();

    AddToListUseCase { repo: repo.clone() }
        .execute(user.id, ListKind::Watchlist, inception())
        .await
        .unwrap();

    let list = GetListUseCase { repo: repo.clone() }
        .execute(user.id, ListKind::Watchlist)
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].movie_id, 27205);
    assert_eq!(list[0].title, "Inception");
    assert_eq!(list[0].poster.as_deref(), Some("/x.jpg"));
    assert!(list[0].added_at >= before);

    let favorites = GetListUseCase { repo }
        .execute(user.id, ListKind::Favorites)
        .await
        .unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_favorite_without_writing() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    let uc = AddToListUseCase { repo: repo.clone() };

    uc.execute(user.id, ListKind::Favorites, fight_club())
        .await
        .unwrap();
    let writes = repo.write_count();

    let result = uc
        .execute(user.id, ListKind::Favorites, fight_club())
        .await;
    assert!(matches!(
        result,
        Err(ApiError::AlreadyInList(ListKind::Favorites))
    ));
    assert_eq!(repo.get(user.id).unwrap().favorites.len(), 1);
    assert_eq!(repo.write_count(), writes);
}

#[tokio::test]
async fn should_keep_watchlist_and_favorites_independent() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    let uc = AddToListUseCase { repo: repo.clone() };

    uc.execute(user.id, ListKind::Watchlist, fight_club())
        .await
        .unwrap();
    let favorites = uc
        .execute(user.id, ListKind::Favorites, fight_club())
        .await
        .unwrap();

    assert_eq!(favorites.len(), 1);
    let stored = repo.get(user.id).unwrap();
    assert_eq!(stored.watchlist.len(), 1);
    assert_eq!(stored.favorites.len(), 1);
}

#[tokio::test]
async fn should_return_full_list_in_insertion_order() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    let uc = AddToListUseCase { repo };

    uc.execute(user.id, ListKind::Watchlist, inception())
        .await
        .unwrap();
    let list = uc
        .execute(user.id, ListKind::Watchlist, fight_club())
        .await
        .unwrap();

    let ids: Vec<i32> = list.iter().map(|e| e.movie_id).collect();
    assert_eq!(ids, vec![27205, 550]);
}

#[tokio::test]
async fn should_reject_blank_title() {
    let user = test_user();
    let uc = AddToListUseCase {
        repo: MemUserRepo::with_user(user.clone()),
    };
    let result = uc
        .execute(
            user.id,
            ListKind::Watchlist,
            AddToListInput {
                movie_id: 1,
                title: "  ".into(),
                poster: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::MissingData)));
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_user() {
    let repo = MemUserRepo::default();
    let missing = Uuid::now_v7();

    let add = AddToListUseCase { repo: repo.clone() }
        .execute(missing, ListKind::Watchlist, inception())
        .await;
    assert!(matches!(add, Err(ApiError::UserNotFound)));

    let get = GetListUseCase { repo: repo.clone() }
        .execute(missing, ListKind::Favorites)
        .await;
    assert!(matches!(get, Err(ApiError::UserNotFound)));

    let remove = RemoveFromListUseCase { repo: repo.clone() }
        .execute(missing, ListKind::Watchlist, 27205)
        .await;
    assert!(matches!(remove, Err(ApiError::UserNotFound)));

    let reviews = GetReviewsUseCase { repo }.execute(missing).await;
    assert!(matches!(reviews, Err(ApiError::UserNotFound)));
}

// ── RemoveFromList ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_idempotently() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    AddToListUseCase { repo: repo.clone() }
        .execute(user.id, ListKind::Watchlist, inception())
        .await
        .unwrap();
    AddToListUseCase { repo: repo.clone() }
        .execute(user.id, ListKind::Watchlist, fight_club())
        .await
        .unwrap();

    let uc = RemoveFromListUseCase { repo };
    let first = uc
        .execute(user.id, ListKind::Watchlist, 27205)
        .await
        .unwrap();
    let second = uc
        .execute(user.id, ListKind::Watchlist, 27205)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].movie_id, 550);
}

// ── AddReview ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_enforce_rating_range_and_one_review_per_movie() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());
    let uc = AddReviewUseCase { repo: repo.clone() };

    let zero = uc.execute(user.id, review(0, "bad")).await;
    assert!(matches!(zero, Err(ApiError::InvalidRating)));
    let six = uc.execute(user.id, review(6, "too good")).await;
    assert!(matches!(six, Err(ApiError::InvalidRating)));

    let reviews = uc.execute(user.id, review(5, "great")).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating.get(), 5);
    assert_eq!(reviews[0].comment, "great");

    let again = uc.execute(user.id, review(4, "still great")).await;
    assert!(matches!(again, Err(ApiError::AlreadyReviewed)));

    let stored = GetReviewsUseCase { repo }.execute(user.id).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn should_require_comment() {
    let user = test_user();
    let uc = AddReviewUseCase {
        repo: MemUserRepo::with_user(user.clone()),
    };
    let result = uc.execute(user.id, review(3, "   ")).await;
    assert!(matches!(result, Err(ApiError::MissingData)));
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_leave_email_and_avatar_when_only_name_changes() {
    let user = test_user();
    let repo = MemUserRepo::with_user(user.clone());

    let updated = UpdateProfileUseCase { repo: repo.clone() }
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("New".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "New");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.avatar, user.avatar);

    let stored = repo.get(user.id).unwrap();
    assert_eq!(stored.name, "New");
    assert_eq!(stored.email, user.email);
    assert_eq!(stored.password_hash, user.password_hash);
}

#[tokio::test]
async fn should_reject_profile_email_owned_by_someone_else() {
    let alice = test_user();
    let mut bob = test_user();
    bob.email = "bob@example.com".into();
    let repo = MemUserRepo::with_user(alice.clone());
    repo.users.lock().unwrap().insert(bob.id, bob.clone());

    let result = UpdateProfileUseCase { repo: repo.clone() }
        .execute(
            alice.id,
            UpdateProfileInput {
                email: Some("BOB@example.com".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::EmailAlreadyRegistered)));
    assert_eq!(repo.get(alice.id).unwrap().email, alice.email);
}

// ── Known race ───────────────────────────────────────────────────────────────

/// Two adds that both read the user before either writes: the second write
/// replaces the whole list and the first entry is lost. There is no version
/// check, so this is the expected outcome rather than a bug to assert away.
#[tokio::test]
async fn concurrent_adds_lose_the_earlier_write() {
    let user = test_user();
    let store = MemUserRepo::with_user(user.clone());

    let first = AddToListUseCase {
        repo: StaleReadUserRepo {
            snapshot: user.clone(),
            store: store.clone(),
        },
    };
    let second = AddToListUseCase {
        repo: StaleReadUserRepo {
            snapshot: user.clone(),
            store: store.clone(),
        },
    };

    first
        .execute(user.id, ListKind::Watchlist, inception())
        .await
        .unwrap();
    second
        .execute(user.id, ListKind::Watchlist, fight_club())
        .await
        .unwrap();

    let watchlist = store.get(user.id).unwrap().watchlist;
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].movie_id, 550);
    assert_eq!(store.write_count(), 2);
}
