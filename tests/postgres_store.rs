//! Postgres store integration tests
//!
//! These need a live database:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test --test postgres_store -- --ignored --test-threads=1
//! ```

mod common;

use bloglist::domain::NewUserRecord;
use bloglist::repository::{BlogRepository, PgStore, RepositoryError, UserRepository};
use bloglist::NewBlog;

use common::setup_test_db;

fn blog(title: &str, author: Option<&str>, likes: i64) -> NewBlog {
    NewBlog::new(
        Some(title.to_string()),
        author.map(str::to_string),
        Some(format!("https://example.com/{}", title)),
        Some(likes),
    )
    .unwrap()
}

fn user(username: &str) -> NewUserRecord {
    NewUserRecord {
        username: username.to_string(),
        name: "Test User".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_blog_lifecycle() {
    let store = PgStore::new(setup_test_db().await);

    let first = BlogRepository::create(&store, blog("first", Some("Ada"), 3), None)
        .await
        .unwrap();
    let second = BlogRepository::create(&store, blog("second", None, 0), None)
        .await
        .unwrap();

    let listed = BlogRepository::list(&store).await.unwrap();
    assert_eq!(listed, vec![first.clone(), second.clone()]);
    assert_eq!(second.author, None);

    let updated = store.update_likes(first.id, 10).await.unwrap().unwrap();
    assert_eq!(updated.likes, 10);
    assert_eq!(updated.title, "first");

    assert!(store.delete(second.id).await.unwrap());
    assert!(!store.delete(second.id).await.unwrap());
    assert!(BlogRepository::find(&store, second.id).await.unwrap().is_none());
    assert!(store.update_likes(second.id, 1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_username() {
    let store = PgStore::new(setup_test_db().await);

    UserRepository::create(&store, user("root")).await.unwrap();
    let err = UserRepository::create(&store, user("root")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::DuplicateUsername(ref name) if name == "root"));
    assert_eq!(UserRepository::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_blogs_by_owner() {
    let store = PgStore::new(setup_test_db().await);

    let owner = UserRepository::create(&store, user("owner")).await.unwrap();
    let found = store.find_by_username("owner").await.unwrap().unwrap();
    assert_eq!(found.id, owner.id);

    let owned = BlogRepository::create(&store, blog("owned", Some("Ada"), 1), Some(owner.id))
        .await
        .unwrap();
    BlogRepository::create(&store, blog("anonymous", Some("Ada"), 1), None)
        .await
        .unwrap();

    let by_owner = store.list_by_owner(owner.id).await.unwrap();
    assert_eq!(by_owner, vec![owned]);
}
