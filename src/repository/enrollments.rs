//! Course membership repository: students and mentors

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EnrollmentStore;
use crate::{error::AppResult, models::Mentor};

#[derive(Clone)]
pub struct EnrollmentsRepository {
    pool: Pool<Postgres>,
}

impl EnrollmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentStore for EnrollmentsRepository {
    async fn count_students(&self, course_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM course_students WHERE course_id = $1 AND progress >= 0",
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn is_entered(&self, course_id: i64, user_id: i64) -> AppResult<bool> {
        let entered: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM course_students
                WHERE course_id = $1 AND user_id = $2 AND progress >= 0
            )
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(entered)
    }

    async fn enter(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO course_students (course_id, user_id, progress)
            VALUES ($1, $2, 0)
            ON CONFLICT (course_id, user_id) DO NOTHING
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn leave(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM course_students WHERE course_id = $1 AND user_id = $2")
            .bind(course_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_mentors(&self, course_id: i64) -> AppResult<Vec<Mentor>> {
        let mentors = sqlx::query_as::<_, Mentor>(
            r#"
            SELECT m.user_id, u.login, u.name, u.avatar, m.role
            FROM course_mentors m
            JOIN users u ON u.id = m.user_id
            WHERE m.course_id = $1
            ORDER BY m.user_id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(mentors)
    }

    async fn is_mentor(&self, course_id: i64, user_id: i64) -> AppResult<bool> {
        let mentor: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM course_mentors WHERE course_id = $1 AND user_id = $2)",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(mentor)
    }

    async fn assign_mentor(&self, course_id: i64, user_id: i64, role: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO course_mentors (course_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (course_id, user_id) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_mentor(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM course_mentors WHERE course_id = $1 AND user_id = $2")
            .bind(course_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
