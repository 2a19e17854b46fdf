//! Postgres store
//!
//! Runtime-checked sqlx queries against the schema in `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{BlogRepository, RepositoryError, UserRepository};
use crate::domain::{BlogRecord, NewBlog, NewUserRecord, User};

type BlogRow = (Uuid, String, Option<String>, String, i64, Option<Uuid>);
type UserRow = (Uuid, String, String, String, DateTime<Utc>);

const BLOG_COLUMNS: &str = "id, title, author, url, likes, owner_id";
const USER_COLUMNS: &str = "id, username, name, password_hash, created_at";

/// Postgres implementation of both repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn blog_from_row(row: BlogRow) -> Result<BlogRecord, RepositoryError> {
    let (id, title, author, url, likes, owner) = row;
    let likes = u64::try_from(likes)
        .map_err(|_| RepositoryError::Corrupt(format!("blog {} has likes = {}", id, likes)))?;

    Ok(BlogRecord {
        id,
        title,
        author,
        url,
        likes,
        owner,
    })
}

fn user_from_row(row: UserRow) -> User {
    let (id, username, name, password_hash, created_at) = row;
    User {
        id,
        username,
        name,
        password_hash,
        created_at,
    }
}

fn likes_to_db(likes: u64) -> Result<i64, RepositoryError> {
    i64::try_from(likes)
        .map_err(|_| RepositoryError::Corrupt(format!("likes {} exceeds column range", likes)))
}

#[async_trait]
impl BlogRepository for PgStore {
    async fn list(&self) -> Result<Vec<BlogRecord>, RepositoryError> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM blogs ORDER BY created_at, id",
            BLOG_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(blog_from_row).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogRecord>, RepositoryError> {
        let row: Option<BlogRow> =
            sqlx::query_as(&format!("SELECT {} FROM blogs WHERE id = $1", BLOG_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(blog_from_row).transpose()
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<BlogRecord>, RepositoryError> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM blogs WHERE owner_id = $1 ORDER BY created_at, id",
            BLOG_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(blog_from_row).collect()
    }

    async fn create(
        &self,
        blog: NewBlog,
        owner: Option<Uuid>,
    ) -> Result<BlogRecord, RepositoryError> {
        let row: BlogRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(blog.title())
        .bind(blog.author())
        .bind(blog.url())
        .bind(likes_to_db(blog.likes())?)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(blog_id = %row.0, "Blog inserted");
        blog_from_row(row)
    }

    async fn update_likes(
        &self,
        id: Uuid,
        likes: u64,
    ) -> Result<Option<BlogRecord>, RepositoryError> {
        let row: Option<BlogRow> = sqlx::query_as(&format!(
            "UPDATE blogs SET likes = $2 WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(id)
        .bind(likes_to_db(likes)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(blog_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(user_from_row).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(user_from_row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    async fn create(&self, user: NewUserRecord) -> Result<User, RepositoryError> {
        let result: Result<UserRow, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (id, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(user_from_row(row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::DuplicateUsername(user.username))
            }
            Err(e) => Err(e.into()),
        }
    }
}
