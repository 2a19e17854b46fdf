//! `/api/stats` integration tests

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

async fn clear_blogs(app: &TestApp) {
    for blog in app.blogs_in_db().await {
        let response = app
            .request(Method::DELETE, &format!("/api/blogs/{}", blog.id), None, None)
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }
}

async fn add_blog(app: &TestApp, title: &str, author: Option<&str>, likes: i64) {
    let response = app
        .post(
            "/api/blogs",
            json!({
                "title": title,
                "author": author,
                "url": format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
                "likes": likes
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_stats_over_initial_blogs() {
    let app = TestApp::new().await;

    let response = app.get("/api/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_json());
    assert_eq!(response.body["total_likes"], 65);
    assert_eq!(
        response.body["favorite_post"],
        json!({ "title": "Tech Trends 2025", "author": "Lucía González", "likes": 40 })
    );
    assert_eq!(
        response.body["most_blogs"],
        json!({ "author": "Mauricio Jourdan", "blogs": 1 })
    );
    assert_eq!(
        response.body["most_likes"],
        json!({ "author": "Lucía González", "likes": 40 })
    );
}

#[tokio::test]
async fn test_stats_of_empty_list_are_null() {
    let app = TestApp::new().await;
    clear_blogs(&app).await;

    let response = app.get("/api/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_likes"], 0);
    assert_eq!(response.body["favorite_post"], Value::Null);
    assert_eq!(response.body["most_blogs"], Value::Null);
    assert_eq!(response.body["most_likes"], Value::Null);
}

#[tokio::test]
async fn test_stats_follow_writes() {
    let app = TestApp::new().await;
    clear_blogs(&app).await;

    add_blog(&app, "React patterns", Some("Michael Chan"), 7).await;
    add_blog(&app, "Go To Statement Considered Harmful", Some("Edsger W. Dijkstra"), 5).await;
    add_blog(&app, "Canonical string reduction", Some("Edsger W. Dijkstra"), 12).await;
    add_blog(&app, "First class tests", Some("Robert C. Martin"), 10).await;
    add_blog(&app, "TDD harms architecture", Some("Robert C. Martin"), 0).await;
    add_blog(&app, "Type wars", Some("Robert C. Martin"), 2).await;

    let response = app.get("/api/stats").await;

    assert_eq!(response.body["total_likes"], 36);
    assert_eq!(response.body["favorite_post"]["title"], "Canonical string reduction");
    assert_eq!(
        response.body["most_blogs"],
        json!({ "author": "Robert C. Martin", "blogs": 3 })
    );
    assert_eq!(
        response.body["most_likes"],
        json!({ "author": "Edsger W. Dijkstra", "likes": 17 })
    );
}

#[tokio::test]
async fn test_stats_group_missing_authors() {
    let app = TestApp::new().await;
    clear_blogs(&app).await;

    add_blog(&app, "Anonymous one", None, 4).await;
    add_blog(&app, "Anonymous two", None, 4).await;
    add_blog(&app, "Signed", Some("Ada"), 5).await;

    let response = app.get("/api/stats").await;

    assert_eq!(
        response.body["most_blogs"],
        json!({ "author": null, "blogs": 2 })
    );
    assert_eq!(
        response.body["most_likes"],
        json!({ "author": null, "likes": 8 })
    );
    assert_eq!(response.body["favorite_post"]["author"], "Ada");
}
