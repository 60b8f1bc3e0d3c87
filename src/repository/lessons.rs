//! Lessons repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LessonStore;
use crate::{
    error::AppResult,
    models::{lesson::CreateLesson, Lesson, Page},
};

#[derive(Clone)]
pub struct LessonsRepository {
    pool: Pool<Postgres>,
}

impl LessonsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonStore for LessonsRepository {
    async fn list(&self, course_id: i64, page: Page) -> AppResult<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, number, title, theme, description, header_avatar, course_id
            FROM lessons
            WHERE course_id = $1
            ORDER BY number, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(course_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    async fn count(&self, course_id: i64) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find(&self, id: i64) -> AppResult<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, number, title, theme, description, header_avatar, course_id
            FROM lessons WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson)
    }

    async fn create(&self, lesson: &CreateLesson) -> AppResult<i64> {
        // Not serialized: two concurrent inserts into one course may share a number.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO lessons (number, title, theme, description, header_avatar, course_id)
            SELECT COALESCE(MAX(number), 0) + 1, $1, $2, $3, $4, $5
            FROM lessons WHERE course_id = $5
            RETURNING id
            "#,
        )
        .bind(&lesson.title)
        .bind(&lesson.theme)
        .bind(&lesson.description)
        .bind(&lesson.header_avatar)
        .bind(lesson.course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, lesson: &Lesson) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE lessons SET
                number = $1,
                title = $2,
                theme = $3,
                description = $4,
                header_avatar = $5,
                course_id = $6
            WHERE id = $7
            "#,
        )
        .bind(lesson.number)
        .bind(&lesson.title)
        .bind(&lesson.theme)
        .bind(&lesson.description)
        .bind(&lesson.header_avatar)
        .bind(lesson.course_id)
        .bind(lesson.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
