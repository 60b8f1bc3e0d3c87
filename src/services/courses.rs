//! Course service: listing, composite detail reads, enrollment and mentors

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        course::{AssignMentor, CourseFilter, CreateCourse, UpdateCourse},
        Course, CourseDetails, CourseRecord, Mentor, Page,
    },
    repository::{CourseStore, EnrollmentStore, UserStore},
};

#[derive(Clone)]
pub struct CoursesService {
    courses: Arc<dyn CourseStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    users: Arc<dyn UserStore>,
}

impl CoursesService {
    pub fn new(
        courses: Arc<dyn CourseStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            courses,
            enrollments,
            users,
        }
    }

    /// List courses in scope; the total is only counted when asked for
    pub async fn list(
        &self,
        filter: &CourseFilter,
        page: Page,
        with_total: bool,
    ) -> AppResult<(Vec<Course>, Option<i64>)> {
        let courses = self.courses.list(filter, page).await?;
        let total = if with_total {
            Some(self.courses.count(filter).await?)
        } else {
            None
        };
        Ok((courses, total))
    }

    /// Course detail as seen by `viewer_id`.
    ///
    /// The base row is read first; mentors, student count and the viewer's
    /// enrollment are then read concurrently. No transaction spans these
    /// reads, so a concurrent change may show up in some parts only.
    pub async fn get(&self, id: i64, viewer_id: i64) -> AppResult<CourseDetails> {
        let record = self.find_record(id).await?;

        let (mentors, students_count, entered) = tokio::try_join!(
            self.enrollments.list_mentors(id),
            self.enrollments.count_students(id),
            self.enrollments.is_entered(id, viewer_id),
        )?;

        Ok(CourseDetails {
            course: Course::from_record(record, students_count, entered),
            mentors,
        })
    }

    /// Create a course owned by `owner_id`
    pub async fn create(&self, owner_id: i64, data: CreateCourse) -> AppResult<CourseDetails> {
        data.validate()?;

        let id = self.courses.create(owner_id, &data).await?;
        tracing::info!("User {} created course {}", owner_id, id);

        self.get(id, owner_id).await
    }

    /// Merge the given fields onto the stored course (owner only)
    pub async fn update(&self, id: i64, user_id: i64, data: UpdateCourse) -> AppResult<CourseDetails> {
        data.validate()?;

        let mut record = self.find_record(id).await?;
        require_owner(&record, user_id)?;

        data.apply(&mut record);
        self.courses.update(&record).await?;

        self.get(id, user_id).await
    }

    /// Delete a course (owner only). A missing course is not an error.
    pub async fn delete(&self, id: i64, user_id: i64) -> AppResult<()> {
        let Some(record) = self.courses.find(id).await? else {
            tracing::debug!("Course {} already absent", id);
            return Ok(());
        };
        require_owner(&record, user_id)?;

        self.courses.delete(id).await?;
        tracing::info!("User {} deleted course {}", user_id, id);
        Ok(())
    }

    /// Enroll the caller
    pub async fn enter(&self, id: i64, user_id: i64) -> AppResult<CourseDetails> {
        self.find_record(id).await?;
        self.enrollments.enter(id, user_id).await?;
        self.get(id, user_id).await
    }

    /// Drop the caller's enrollment
    pub async fn leave(&self, id: i64, user_id: i64) -> AppResult<CourseDetails> {
        self.find_record(id).await?;
        self.enrollments.leave(id, user_id).await?;
        self.get(id, user_id).await
    }

    pub async fn mentors(&self, id: i64) -> AppResult<Vec<Mentor>> {
        self.find_record(id).await?;
        self.enrollments.list_mentors(id).await
    }

    /// Grant a user a role on the course (owner only)
    pub async fn assign_mentor(&self, id: i64, user_id: i64, data: AssignMentor) -> AppResult<Vec<Mentor>> {
        data.validate()?;

        let record = self.find_record(id).await?;
        require_owner(&record, user_id)?;

        if self.users.find(data.user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", data.user_id)));
        }

        self.enrollments.assign_mentor(id, data.user_id, &data.role).await?;
        self.enrollments.list_mentors(id).await
    }

    /// Remove a mentor (owner only)
    pub async fn remove_mentor(&self, id: i64, user_id: i64, mentor_id: i64) -> AppResult<()> {
        let record = self.find_record(id).await?;
        require_owner(&record, user_id)?;

        self.enrollments.remove_mentor(id, mentor_id).await
    }

    async fn find_record(&self, id: i64) -> AppResult<CourseRecord> {
        self.courses
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))
    }
}

fn require_owner(course: &CourseRecord, user_id: i64) -> AppResult<()> {
    if course.owner_id != user_id {
        return Err(AppError::Authorization(format!(
            "Only the owner can modify course {}",
            course.id
        )));
    }
    Ok(())
}
