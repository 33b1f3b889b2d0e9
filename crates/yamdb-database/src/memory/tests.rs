use std::sync::Arc;

use yamdb_core::error::ErrorKind;
use yamdb_core::types::PageRequest;
use yamdb_entity::catalog::{CreateTaxon, TaxonomyKind, TitleFilter};
use yamdb_entity::review::{CreateComment, CreateReview};
use yamdb_entity::user::{CreateUser, UpdateUser, UserFilter, UserRole};

use super::MemoryStore;
use crate::traits::{
    CommentRepository, NewTitle, ReviewRepository, TaxonomyRepository, TitleRepository,
    UserRepository,
};

async fn seed_title(store: &MemoryStore) -> (uuid::Uuid, uuid::Uuid) {
    let film = TaxonomyRepository::create(
        store,
        TaxonomyKind::Category,
        &CreateTaxon {
            name: "Film".into(),
            slug: "film".into(),
        },
    )
    .await
    .unwrap();
    let drama = TaxonomyRepository::create(
        store,
        TaxonomyKind::Genre,
        &CreateTaxon {
            name: "Drama".into(),
            slug: "drama".into(),
        },
    )
    .await
    .unwrap();
    let title = TitleRepository::create(
        store,
        &NewTitle {
            name: "Solaris".into(),
            year: 1972,
            description: None,
            category_id: Some(film.id),
            genre_ids: vec![drama.id],
        },
    )
    .await
    .unwrap();
    (title.id, film.id)
}

#[tokio::test]
async fn test_user_uniqueness_both_directions() {
    let store = MemoryStore::new();
    UserRepository::create(&store, &CreateUser::basic("alice", "alice@example.com"))
        .await
        .unwrap();

    let same_name = UserRepository::create(&store, &CreateUser::basic("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert!(same_name.is(ErrorKind::Conflict));

    let same_email = UserRepository::create(&store, &CreateUser::basic("bob", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(same_email.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_user_update_rejects_taken_username() {
    let store = MemoryStore::new();
    UserRepository::create(&store, &CreateUser::basic("alice", "a@example.com"))
        .await
        .unwrap();
    let bob = UserRepository::create(&store, &CreateUser::basic("bob", "b@example.com"))
        .await
        .unwrap();

    let err = UserRepository::update(
        &store,
        bob.id,
        &UpdateUser {
            username: Some("alice".into()),
            ..UpdateUser::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let renamed = UserRepository::update(
        &store,
        bob.id,
        &UpdateUser {
            email: Some("b@example.com".into()),
            role: Some(UserRole::Moderator),
            ..UpdateUser::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.role, UserRole::Moderator);
}

#[tokio::test]
async fn test_user_list_is_ordered_and_filtered() {
    let store = MemoryStore::new();
    for name in ["carol", "alice", "bob"] {
        UserRepository::create(&store, &CreateUser::basic(name, format!("{name}@example.com")))
            .await
            .unwrap();
    }
    let page = UserRepository::list(&store, &UserFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = page.items.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "carol"]);

    let filtered = UserRepository::list(
        &store,
        &UserFilter {
            search: Some("BO".into()),
            ..UserFilter::default()
        },
        &PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(filtered.total_items, 1);
}

#[tokio::test]
async fn test_duplicate_review_is_conflict() {
    let store = MemoryStore::new();
    let (title_id, _) = seed_title(&store).await;
    let author = UserRepository::create(&store, &CreateUser::basic("critic", "c@example.com"))
        .await
        .unwrap();
    let data = CreateReview {
        title_id,
        author_id: author.id,
        text: "Slow and hypnotic".into(),
        score: 9,
    };

    let review = ReviewRepository::create(&store, &data).await.unwrap();
    assert_eq!(review.author, "critic");

    let err = ReviewRepository::create(&store, &data).await.unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_reviews_yield_one_success() {
    let store = Arc::new(MemoryStore::new());
    let (title_id, _) = seed_title(&store).await;
    let author = UserRepository::create(store.as_ref(), &CreateUser::basic("racer", "r@example.com"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let data = CreateReview {
            title_id,
            author_id: author.id,
            text: format!("attempt {i}"),
            score: 5,
        };
        handles.push(tokio::spawn(async move {
            ReviewRepository::create(store.as_ref(), &data).await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) if e.is(ErrorKind::Conflict) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn test_title_delete_cascades_to_reviews_and_comments() {
    let store = MemoryStore::new();
    let (title_id, _) = seed_title(&store).await;
    let author = UserRepository::create(&store, &CreateUser::basic("critic", "c@example.com"))
        .await
        .unwrap();
    let review = ReviewRepository::create(
        &store,
        &CreateReview {
            title_id,
            author_id: author.id,
            text: "ok".into(),
            score: 6,
        },
    )
    .await
    .unwrap();
    let comment = CommentRepository::create(
        &store,
        &CreateComment {
            review_id: review.id,
            author_id: author.id,
            text: "agreed".into(),
        },
    )
    .await
    .unwrap();

    assert!(TitleRepository::delete(&store, title_id).await.unwrap());
    assert!(ReviewRepository::find(&store, title_id, review.id)
        .await
        .unwrap()
        .is_none());
    assert!(CommentRepository::find(&store, review.id, comment.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_user_delete_cascades_to_authored_content() {
    let store = MemoryStore::new();
    let (title_id, _) = seed_title(&store).await;
    let author = UserRepository::create(&store, &CreateUser::basic("gone", "g@example.com"))
        .await
        .unwrap();
    ReviewRepository::create(
        &store,
        &CreateReview {
            title_id,
            author_id: author.id,
            text: "bye".into(),
            score: 3,
        },
    )
    .await
    .unwrap();

    assert!(UserRepository::delete(&store, author.id).await.unwrap());
    let scores = ReviewRepository::scores_for_title(&store, title_id).await.unwrap();
    assert!(scores.is_empty());
}

#[tokio::test]
async fn test_category_delete_clears_title_category() {
    let store = MemoryStore::new();
    let (title_id, film_id) = seed_title(&store).await;

    assert!(TaxonomyRepository::delete(&store, TaxonomyKind::Category, film_id)
        .await
        .unwrap());
    let title = TitleRepository::find_by_id(&store, title_id)
        .await
        .unwrap()
        .unwrap();
    assert!(title.category_id.is_none());
}

#[tokio::test]
async fn test_title_filters() {
    let store = MemoryStore::new();
    let (title_id, _) = seed_title(&store).await;

    let by_genre = TitleFilter {
        genre: Some("drama".into()),
        name: Some("SOL".into()),
        ..TitleFilter::default()
    };
    let page = TitleRepository::list(&store, &by_genre, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, title_id);

    let wrong_year = TitleFilter {
        year: Some(2001),
        ..TitleFilter::default()
    };
    let page = TitleRepository::list(&store, &wrong_year, &PageRequest::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_taxonomy_slug_conflict() {
    let store = MemoryStore::new();
    seed_title(&store).await;
    let err = TaxonomyRepository::create(
        &store,
        TaxonomyKind::Genre,
        &CreateTaxon {
            name: "Another drama".into(),
            slug: "drama".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}
