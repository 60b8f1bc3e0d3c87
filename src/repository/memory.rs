//! In-memory store used by handler and service tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{CourseStore, EnrollmentStore, LessonStore, UserStore, DUPLICATE_LOGIN};
use crate::{
    error::{AppError, AppResult},
    models::{
        course::{CourseFilter, CreateCourse},
        lesson::CreateLesson,
        user::{NewUser, UserFilter},
        Course, CourseRecord, CourseScope, Credentials, Lesson, Mentor, Page, User,
    },
    services::Stores,
};

#[derive(Default)]
struct State {
    last_id: i64,
    users: Vec<(User, String)>,
    courses: Vec<CourseRecord>,
    lessons: Vec<Lesson>,
    /// (course_id, user_id, progress)
    students: Vec<(i64, i64, i32)>,
    /// (course_id, user_id, role)
    mentors: Vec<(i64, i64, String)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn entered(&self, course_id: i64, user_id: i64) -> bool {
        self.students
            .iter()
            .any(|(c, u, progress)| *c == course_id && *u == user_id && *progress >= 0)
    }

    fn students_count(&self, course_id: i64) -> i64 {
        self.students
            .iter()
            .filter(|(c, _, progress)| *c == course_id && *progress >= 0)
            .count() as i64
    }

    fn is_mentor(&self, course_id: i64, user_id: i64) -> bool {
        self.mentors.iter().any(|(c, u, _)| *c == course_id && *u == user_id)
    }

    fn course_matches(&self, course: &CourseRecord, filter: &CourseFilter) -> bool {
        let in_scope = match filter.scope {
            CourseScope::All => true,
            CourseScope::My => self.entered(course.id, filter.viewer_id),
            CourseScope::Admin => {
                course.owner_id == filter.viewer_id || self.is_mentor(course.id, filter.viewer_id)
            }
        };
        let matches_search = filter
            .search
            .as_deref()
            .map_or(true, |search| course.title.contains(search));
        in_scope && matches_search
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.offset as usize).take(page.limit as usize).collect()
}

/// Shared state behind every store trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stores(&self) -> Stores {
        Stores {
            users: Arc::new(self.clone()),
            courses: Arc::new(self.clone()),
            lessons: Arc::new(self.clone()),
            enrollments: Arc::new(self.clone()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self, filter: &UserFilter, page: Page) -> AppResult<Vec<User>> {
        let state = self.lock();
        let rows = state
            .users
            .iter()
            .map(|(user, _)| user)
            .filter(|user| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |s| user.login.contains(s) || user.name.contains(s))
            })
            .cloned();
        Ok(window(rows, page))
    }

    async fn count(&self, filter: &UserFilter) -> AppResult<i64> {
        let users = UserStore::list(self, filter, Page::new(i64::MAX, 0)).await?;
        Ok(users.len() as i64)
    }

    async fn find(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(&self, login: &str) -> AppResult<Option<Credentials>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.login == login)
            .map(|(user, hash)| Credentials {
                user_id: user.id,
                password_hash: hash.clone(),
            }))
    }

    async fn login_exists(&self, login: &str) -> AppResult<bool> {
        Ok(self.lock().users.iter().any(|(user, _)| user.login == login))
    }

    async fn create(&self, user: &NewUser) -> AppResult<i64> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.login == user.login) {
            return Err(AppError::Conflict(DUPLICATE_LOGIN.to_string()));
        }
        let id = state.next_id();
        state.users.push((
            User {
                id,
                login: user.login.clone(),
                name: user.name.clone(),
                avatar: user.avatar.clone(),
                about: user.about.clone(),
                created_at: Utc::now(),
            },
            user.password_hash.clone(),
        ));
        Ok(id)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut state = self.lock();
        if let Some((stored, _)) = state.users.iter_mut().find(|(u, _)| u.id == user.id) {
            stored.name = user.name.clone();
            stored.avatar = user.avatar.clone();
            stored.about = user.about.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list(&self, filter: &CourseFilter, page: Page) -> AppResult<Vec<Course>> {
        let state = self.lock();
        let rows = state
            .courses
            .iter()
            .filter(|course| state.course_matches(course, filter))
            .map(|course| {
                Course::from_record(
                    course.clone(),
                    state.students_count(course.id),
                    state.entered(course.id, filter.viewer_id),
                )
            });
        Ok(window(rows, page))
    }

    async fn count(&self, filter: &CourseFilter) -> AppResult<i64> {
        let state = self.lock();
        Ok(state
            .courses
            .iter()
            .filter(|course| state.course_matches(course, filter))
            .count() as i64)
    }

    async fn find(&self, id: i64) -> AppResult<Option<CourseRecord>> {
        Ok(self.lock().courses.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, owner_id: i64, course: &CreateCourse) -> AppResult<i64> {
        let mut state = self.lock();
        let id = state.next_id();
        state.courses.push(CourseRecord {
            id,
            title: course.title.clone(),
            description: course.description.clone(),
            avatar: course.avatar.clone(),
            owner_id,
        });
        Ok(id)
    }

    async fn update(&self, course: &CourseRecord) -> AppResult<()> {
        let mut state = self.lock();
        if let Some(stored) = state.courses.iter_mut().find(|c| c.id == course.id) {
            stored.title = course.title.clone();
            stored.description = course.description.clone();
            stored.avatar = course.avatar.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut state = self.lock();
        state.courses.retain(|c| c.id != id);
        state.lessons.retain(|l| l.course_id != id);
        state.students.retain(|(c, _, _)| *c != id);
        state.mentors.retain(|(c, _, _)| *c != id);
        Ok(())
    }
}

#[async_trait]
impl LessonStore for MemoryStore {
    async fn list(&self, course_id: i64, page: Page) -> AppResult<Vec<Lesson>> {
        let state = self.lock();
        let mut lessons: Vec<Lesson> = state
            .lessons
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| (l.number, l.id));
        Ok(window(lessons.into_iter(), page))
    }

    async fn count(&self, course_id: i64) -> AppResult<i64> {
        Ok(self
            .lock()
            .lessons
            .iter()
            .filter(|l| l.course_id == course_id)
            .count() as i64)
    }

    async fn find(&self, id: i64) -> AppResult<Option<Lesson>> {
        Ok(self.lock().lessons.iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, lesson: &CreateLesson) -> AppResult<i64> {
        let mut state = self.lock();
        let id = state.next_id();
        let number = state
            .lessons
            .iter()
            .filter(|l| l.course_id == lesson.course_id)
            .map(|l| l.number)
            .max()
            .unwrap_or(0)
            + 1;
        state.lessons.push(Lesson {
            id,
            number,
            title: lesson.title.clone(),
            theme: lesson.theme.clone(),
            description: lesson.description.clone(),
            header_avatar: lesson.header_avatar.clone(),
            course_id: lesson.course_id,
        });
        Ok(id)
    }

    async fn update(&self, lesson: &Lesson) -> AppResult<()> {
        let mut state = self.lock();
        if let Some(stored) = state.lessons.iter_mut().find(|l| l.id == lesson.id) {
            *stored = lesson.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.lock().lessons.retain(|l| l.id != id);
        Ok(())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn count_students(&self, course_id: i64) -> AppResult<i64> {
        Ok(self.lock().students_count(course_id))
    }

    async fn is_entered(&self, course_id: i64, user_id: i64) -> AppResult<bool> {
        Ok(self.lock().entered(course_id, user_id))
    }

    async fn enter(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        let mut state = self.lock();
        if !state.students.iter().any(|(c, u, _)| *c == course_id && *u == user_id) {
            state.students.push((course_id, user_id, 0));
        }
        Ok(())
    }

    async fn leave(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        self.lock()
            .students
            .retain(|(c, u, _)| !(*c == course_id && *u == user_id));
        Ok(())
    }

    async fn list_mentors(&self, course_id: i64) -> AppResult<Vec<Mentor>> {
        let state = self.lock();
        let mut mentors: Vec<Mentor> = state
            .mentors
            .iter()
            .filter(|(c, _, _)| *c == course_id)
            .filter_map(|(_, user_id, role)| {
                state.users.iter().find(|(u, _)| u.id == *user_id).map(|(u, _)| Mentor {
                    user_id: u.id,
                    login: u.login.clone(),
                    name: u.name.clone(),
                    avatar: u.avatar.clone(),
                    role: role.clone(),
                })
            })
            .collect();
        mentors.sort_by_key(|m| m.user_id);
        Ok(mentors)
    }

    async fn is_mentor(&self, course_id: i64, user_id: i64) -> AppResult<bool> {
        Ok(self.lock().is_mentor(course_id, user_id))
    }

    async fn assign_mentor(&self, course_id: i64, user_id: i64, role: &str) -> AppResult<()> {
        let mut state = self.lock();
        match state
            .mentors
            .iter_mut()
            .find(|(c, u, _)| *c == course_id && *u == user_id)
        {
            Some(mentor) => mentor.2 = role.to_string(),
            None => state.mentors.push((course_id, user_id, role.to_string())),
        }
        Ok(())
    }

    async fn remove_mentor(&self, course_id: i64, user_id: i64) -> AppResult<()> {
        self.lock()
            .mentors
            .retain(|(c, u, _)| !(*c == course_id && *u == user_id));
        Ok(())
    }
}
