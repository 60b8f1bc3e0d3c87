//! Courses repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::CourseStore;
use crate::{
    error::AppResult,
    models::{
        course::{CourseFilter, CreateCourse},
        Course, CourseRecord, CourseScope, Page,
    },
};

#[derive(Clone)]
pub struct CoursesRepository {
    pool: Pool<Postgres>,
}

impl CoursesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause shared by the list and count queries
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CourseFilter) {
    builder.push(" WHERE TRUE");

    match filter.scope {
        CourseScope::All => {}
        CourseScope::My => {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM course_students s \
                     WHERE s.course_id = c.id AND s.progress >= 0 AND s.user_id = ",
                )
                .push_bind(filter.viewer_id)
                .push(")");
        }
        CourseScope::Admin => {
            builder
                .push(" AND (c.owner_id = ")
                .push_bind(filter.viewer_id)
                .push(
                    " OR EXISTS (SELECT 1 FROM course_mentors m \
                     WHERE m.course_id = c.id AND m.user_id = ",
                )
                .push_bind(filter.viewer_id)
                .push("))");
        }
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(" AND c.title LIKE ")
            .push_bind(format!("%{}%", search));
    }
}

#[async_trait]
impl CourseStore for CoursesRepository {
    async fn list(&self, filter: &CourseFilter, page: Page) -> AppResult<Vec<Course>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT c.id, c.title, c.description, c.avatar, c.owner_id,
                   (SELECT COUNT(*) FROM course_students s
                     WHERE s.course_id = c.id AND s.progress >= 0) AS students_count,
                   EXISTS (SELECT 1 FROM course_students s
                     WHERE s.course_id = c.id AND s.progress >= 0 AND s.user_id = "#,
        );
        builder.push_bind(filter.viewer_id).push(") AS entered FROM courses c");
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY c.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let courses = builder
            .build_query_as::<Course>()
            .fetch_all(&self.pool)
            .await?;

        Ok(courses)
    }

    async fn count(&self, filter: &CourseFilter) -> AppResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM courses c");
        push_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn find(&self, id: i64) -> AppResult<Option<CourseRecord>> {
        let course = sqlx::query_as::<_, CourseRecord>(
            "SELECT id, title, description, avatar, owner_id FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn create(&self, owner_id: i64, course: &CreateCourse) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO courses (title, description, avatar, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.avatar)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, course: &CourseRecord) -> AppResult<()> {
        sqlx::query("UPDATE courses SET title = $1, description = $2, avatar = $3 WHERE id = $4")
            .bind(&course.title)
            .bind(&course.description)
            .bind(&course.avatar)
            .bind(course.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
