//! Lesson service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        lesson::{CreateLesson, UpdateLesson},
        Lesson, Page,
    },
    repository::{CourseStore, EnrollmentStore, LessonStore},
};

#[derive(Clone)]
pub struct LessonsService {
    lessons: Arc<dyn LessonStore>,
    courses: Arc<dyn CourseStore>,
    enrollments: Arc<dyn EnrollmentStore>,
}

impl LessonsService {
    pub fn new(
        lessons: Arc<dyn LessonStore>,
        courses: Arc<dyn CourseStore>,
        enrollments: Arc<dyn EnrollmentStore>,
    ) -> Self {
        Self {
            lessons,
            courses,
            enrollments,
        }
    }

    pub async fn list(&self, course_id: i64, page: Page, with_total: bool) -> AppResult<(Vec<Lesson>, Option<i64>)> {
        let lessons = self.lessons.list(course_id, page).await?;
        let total = if with_total {
            Some(self.lessons.count(course_id).await?)
        } else {
            None
        };
        Ok((lessons, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Lesson> {
        self.lessons
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson {} not found", id)))
    }

    /// Add a lesson at the end of its course
    pub async fn create(&self, user_id: i64, data: CreateLesson) -> AppResult<Lesson> {
        data.validate()?;
        self.require_editor(data.course_id, user_id).await?;

        let id = self.lessons.create(&data).await?;
        tracing::info!("User {} created lesson {} in course {}", user_id, id, data.course_id);

        self.get_by_id(id).await
    }

    /// Merge the given fields onto the stored lesson
    pub async fn update(&self, id: i64, user_id: i64, data: UpdateLesson) -> AppResult<Lesson> {
        data.validate()?;

        let mut lesson = self.get_by_id(id).await?;
        self.require_editor(lesson.course_id, user_id).await?;

        data.apply(&mut lesson);
        // Moving a lesson needs edit rights on the target course as well
        self.require_editor(lesson.course_id, user_id).await?;

        self.lessons.update(&lesson).await?;
        self.get_by_id(id).await
    }

    /// Delete a lesson. A missing lesson is not an error.
    pub async fn delete(&self, id: i64, user_id: i64) -> AppResult<()> {
        let Some(lesson) = self.lessons.find(id).await? else {
            return Ok(());
        };
        self.require_editor(lesson.course_id, user_id).await?;

        self.lessons.delete(id).await
    }

    /// The course owner and its mentors may edit lessons
    async fn require_editor(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        let course = self
            .courses
            .find(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;

        if course.owner_id == user_id || self.enrollments.is_mentor(course_id, user_id).await? {
            return Ok(());
        }

        Err(AppError::Authorization(format!(
            "Only the owner or a mentor can edit lessons of course {}",
            course_id
        )))
    }
}
