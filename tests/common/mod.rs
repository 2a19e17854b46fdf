//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bloglist::api::{self, AppState};
use bloglist::repository::{BlogRepository, InMemoryStore, UserRepository};
use bloglist::{BlogRecord, Config, NewBlog, User};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;

pub const SECRET: &str = "test-secret";

/// `(title, author, url, likes)` seeded before each test
pub const INITIAL_BLOGS: &[(&str, &str, &str, i64)] = &[
    (
        "My Blog",
        "Mauricio Jourdan",
        "https://mauricio.jourdan.com.ar",
        25,
    ),
    (
        "Tech Trends 2025",
        "Lucía González",
        "https://luciagonzalez.dev/tech-trends",
        40,
    ),
];

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error_message(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn is_json(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}

pub struct TestApp {
    pub app: Router,
    pub store: InMemoryStore,
    pub state: AppState,
}

impl TestApp {
    /// App over an in-memory store holding `INITIAL_BLOGS`
    pub async fn new() -> Self {
        Self::with_config(Config::in_memory(SECRET)).await
    }

    pub async fn with_config(config: Config) -> Self {
        let store = InMemoryStore::new();
        for (title, author, url, likes) in INITIAL_BLOGS {
            let blog = NewBlog::new(
                Some(title.to_string()),
                Some(author.to_string()),
                Some(url.to_string()),
                Some(*likes),
            )
            .expect("seed blog is valid");
            BlogRepository::create(&store, blog, None)
                .await
                .expect("Failed to seed blog");
        }

        let state = AppState::in_memory(store.clone(), &config);
        let app = api::build_app(state.clone());

        Self { app, store, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn blogs_in_db(&self) -> Vec<BlogRecord> {
        BlogRepository::list(&self.store).await.unwrap()
    }

    pub async fn users_in_db(&self) -> Vec<User> {
        UserRepository::list(&self.store).await.unwrap()
    }

    /// An id that is well formed but belongs to no blog
    pub fn non_existing_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Register a user through the API and return a login token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let created = self
            .post(
                "/api/users",
                serde_json::json!({
                    "username": username,
                    "name": format!("{} name", username),
                    "password": password,
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "user creation failed");

        let login = self
            .post(
                "/api/login",
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "login failed");

        login.body["token"].as_str().unwrap().to_string()
    }
}

/// Connect to the database named by `DATABASE_URL`, migrate, and empty it
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    bloglist::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE TABLE blogs, users CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
