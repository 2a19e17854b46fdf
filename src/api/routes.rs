//! API Routes
//!
//! HTTP endpoint definitions.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BlogRecord, OperationContext, User};
use crate::error::AppError;
use crate::handlers::{
    CreateBlogCommand, CreateUserCommand, DeleteBlogCommand, LoginCommand, LoginResult,
    UpdateLikesCommand,
};
use crate::stats::{self, BlogStats};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

/// Blog creation body. Every field is optional here so that missing
/// fields produce validation errors rather than parse errors.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub likes: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Blog as listed under its owner
#[derive(Debug, Serialize)]
pub struct UserBlogSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl From<BlogRecord> for UserBlogSummary {
    fn from(blog: BlogRecord) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub blogs: Vec<UserBlogSummary>,
}

impl UserResponse {
    fn new(user: User, blogs: Vec<BlogRecord>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            created_at: user.created_at,
            blogs: blogs.into_iter().map(UserBlogSummary::from).collect(),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::MalformedId(raw.to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router (mounted under `/api`)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Blogs
        .route("/blogs", get(list_blogs).post(create_blog))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        // Aggregates over all blogs
        .route("/stats", get(get_stats))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        // Login
        .route("/login", post(login))
}

// =========================================================================
// Blogs
// =========================================================================

/// List all blogs
async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogRecord>>, AppError> {
    Ok(Json(state.blogs.list().await?))
}

/// Get blog by ID
async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogRecord>, AppError> {
    let id = parse_id(&id)?;

    let blog = state
        .blogs
        .find(id)
        .await?
        .ok_or_else(|| AppError::BlogNotFound(id.to_string()))?;

    Ok(Json(blog))
}

/// Create a blog
async fn create_blog(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogRecord>), AppError> {
    let request = json_body(payload)?;

    let command = CreateBlogCommand {
        title: request.title,
        author: request.author,
        url: request.url,
        likes: request.likes,
    };

    let blog = state.blog_handler().create(command, &context).await?;

    Ok((StatusCode::CREATED, Json(blog)))
}

/// Update a blog's likes
async fn update_blog(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<Json<BlogRecord>, AppError> {
    let id = parse_id(&id)?;
    let request = json_body(payload)?;

    let blog = state
        .blog_handler()
        .update_likes(UpdateLikesCommand::new(id, request.likes), &context)
        .await?;

    Ok(Json(blog))
}

/// Delete a blog
async fn delete_blog(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    state
        .blog_handler()
        .delete(DeleteBlogCommand::new(id), &context)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// Stats
// =========================================================================

/// Like and authorship aggregates over every stored blog
async fn get_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, AppError> {
    let blogs = state.blogs.list().await?;
    Ok(Json(stats::summarize(&blogs)))
}

// =========================================================================
// Users
// =========================================================================

/// List users with the blogs they created
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list().await?;

    let mut by_owner: HashMap<Uuid, Vec<BlogRecord>> = HashMap::new();
    for blog in state.blogs.list().await? {
        if let Some(owner) = blog.owner {
            by_owner.entry(owner).or_default().push(blog);
        }
    }

    let response = users
        .into_iter()
        .map(|user| {
            let blogs = by_owner.remove(&user.id).unwrap_or_default();
            UserResponse::new(user, blogs)
        })
        .collect();

    Ok(Json(response))
}

/// Get user by ID
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_id(&id)?;

    let user = state
        .users
        .find(id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;
    let blogs = state.blogs.list_by_owner(id).await?;

    Ok(Json(UserResponse::new(user, blogs)))
}

/// Register a user
async fn create_user(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let request = json_body(payload)?;

    let command = CreateUserCommand {
        username: request.username,
        name: request.name,
        password: request.password,
    };

    let user = state.create_user_handler().execute(command, &context).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::new(user, Vec::new()))))
}

// =========================================================================
// Login
// =========================================================================

/// Exchange credentials for a token
async fn login(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResult>, AppError> {
    let request = json_body(payload)?;

    let result = state
        .login_handler()
        .execute(LoginCommand::new(request.username, request.password), &context)
        .await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_blog_request_allows_missing_fields() {
        let request: CreateBlogRequest =
            serde_json::from_str(r#"{"author": "Laura Martínez", "likes": 85}"#).unwrap();

        assert!(request.title.is_none());
        assert!(request.url.is_none());
        assert_eq!(request.likes, Some(85));
    }

    #[test]
    fn test_negative_likes_parse_for_later_validation() {
        let request: UpdateBlogRequest = serde_json::from_str(r#"{"likes": -3}"#).unwrap();
        assert_eq!(request.likes, Some(-3));
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("5a3d5da59070081a82a3445"), Err(AppError::MalformedId(_))));
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "root".to_string(),
            name: "Superuser".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::new(user, Vec::new())).unwrap();
        assert_eq!(json["username"], "root");
        assert!(json.get("password_hash").is_none());
        assert!(json["blogs"].as_array().unwrap().is_empty());
    }
}
