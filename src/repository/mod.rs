//! Repository layer for database operations
//!
//! Each entity is reached through a capability trait. The PostgreSQL
//! repositories below implement them; services only ever see the traits, so a
//! store can be swapped without touching the handlers.

pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod users;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        course::{CourseFilter, CreateCourse},
        lesson::CreateLesson,
        user::{NewUser, UserFilter},
        Course, CourseRecord, Credentials, Lesson, Mentor, Page, User,
    },
};

/// Message carried by the conflict raised for an already registered login
pub const DUPLICATE_LOGIN: &str = "Login already exists";

/// User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self, filter: &UserFilter, page: Page) -> AppResult<Vec<User>>;

    async fn count(&self, filter: &UserFilter) -> AppResult<i64>;

    async fn find(&self, id: i64) -> AppResult<Option<User>>;

    /// Stored password hash for a login, if the login exists
    async fn find_credentials(&self, login: &str) -> AppResult<Option<Credentials>>;

    async fn login_exists(&self, login: &str) -> AppResult<bool>;

    /// Insert a user and return its new identifier; a taken login is a
    /// `Conflict` even when another insert won the race
    async fn create(&self, user: &NewUser) -> AppResult<i64>;

    /// Persist name, avatar and about of an existing user
    async fn update(&self, user: &User) -> AppResult<()>;
}

/// Course persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Courses in scope, ordered by id, with derived fields computed for the viewer
    async fn list(&self, filter: &CourseFilter, page: Page) -> AppResult<Vec<Course>>;

    async fn count(&self, filter: &CourseFilter) -> AppResult<i64>;

    async fn find(&self, id: i64) -> AppResult<Option<CourseRecord>>;

    async fn create(&self, owner_id: i64, course: &CreateCourse) -> AppResult<i64>;

    async fn update(&self, course: &CourseRecord) -> AppResult<()>;

    /// Deleting a missing course is a no-op
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Lesson persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonStore: Send + Sync {
    /// Lessons of a course ordered by number
    async fn list(&self, course_id: i64, page: Page) -> AppResult<Vec<Lesson>>;

    async fn count(&self, course_id: i64) -> AppResult<i64>;

    async fn find(&self, id: i64) -> AppResult<Option<Lesson>>;

    /// Insert a lesson numbered after the last lesson of its course
    async fn create(&self, lesson: &CreateLesson) -> AppResult<i64>;

    async fn update(&self, lesson: &Lesson) -> AppResult<()>;

    /// Deleting a missing lesson is a no-op
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Course membership: enrolled students and mentors
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn count_students(&self, course_id: i64) -> AppResult<i64>;

    async fn is_entered(&self, course_id: i64, user_id: i64) -> AppResult<bool>;

    /// Enroll with zero progress; entering twice keeps the first enrollment
    async fn enter(&self, course_id: i64, user_id: i64) -> AppResult<()>;

    async fn leave(&self, course_id: i64, user_id: i64) -> AppResult<()>;

    async fn list_mentors(&self, course_id: i64) -> AppResult<Vec<Mentor>>;

    async fn is_mentor(&self, course_id: i64, user_id: i64) -> AppResult<bool>;

    /// Insert a mentor or replace the role of an existing one
    async fn assign_mentor(&self, course_id: i64, user_id: i64, role: &str) -> AppResult<()>;

    async fn remove_mentor(&self, course_id: i64, user_id: i64) -> AppResult<()>;
}

/// PostgreSQL stores sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub users: users::UsersRepository,
    pub courses: courses::CoursesRepository,
    pub lessons: lessons::LessonsRepository,
    pub enrollments: enrollments::EnrollmentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            courses: courses::CoursesRepository::new(pool.clone()),
            lessons: lessons::LessonsRepository::new(pool.clone()),
            enrollments: enrollments::EnrollmentsRepository::new(pool),
        }
    }
}
