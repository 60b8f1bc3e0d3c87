//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{UserStore, DUPLICATE_LOGIN};
use crate::{
    error::{AppError, AppResult},
    models::{
        user::{NewUser, UserFilter},
        Credentials, Page, User,
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// The UNIQUE index on `users.login` is the arbiter for concurrent registrations
fn map_insert_error(error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict(DUPLICATE_LOGIN.to_string())
        }
        other => AppError::Database(other),
    }
}

fn search_pattern(filter: &UserFilter) -> Option<String> {
    filter
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn list(&self, filter: &UserFilter, page: Page) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, name, avatar, about, created_at
            FROM users
            WHERE ($1::text IS NULL OR login LIKE $1 OR name LIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern(filter))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn count(&self, filter: &UserFilter) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR login LIKE $1 OR name LIKE $1)",
        )
        .bind(search_pattern(filter))
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn find(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, name, avatar, about, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_credentials(&self, login: &str) -> AppResult<Option<Credentials>> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id AS user_id, password_hash FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    async fn login_exists(&self, login: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)")
            .bind(login)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create(&self, user: &NewUser) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (login, name, avatar, about, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.login)
        .bind(&user.name)
        .bind(&user.avatar)
        .bind(&user.about)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(id)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        sqlx::query("UPDATE users SET name = $1, avatar = $2, about = $3 WHERE id = $4")
            .bind(&user.name)
            .bind(&user.avatar)
            .bind(&user.about)
            .bind(user.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
