//! Business logic services

pub mod auth;
pub mod courses;
pub mod images;
pub mod lessons;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{ServerConfig, StorageConfig},
    repository::{CourseStore, EnrollmentStore, LessonStore, Repository, UserStore},
};

/// Store handles the services are built from
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub lessons: Arc<dyn LessonStore>,
    pub enrollments: Arc<dyn EnrollmentStore>,
}

impl From<Repository> for Stores {
    fn from(repository: Repository) -> Self {
        Self {
            users: Arc::new(repository.users),
            courses: Arc::new(repository.courses),
            lessons: Arc::new(repository.lessons),
            enrollments: Arc::new(repository.enrollments),
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub courses: courses::CoursesService,
    pub lessons: lessons::LessonsService,
    pub images: images::ImageService,
}

impl Services {
    /// Create all services over the given stores
    pub fn new(stores: Stores, server_config: &ServerConfig, storage_config: &StorageConfig) -> Self {
        Self {
            auth: auth::AuthService::new(stores.users.clone()),
            users: users::UsersService::new(stores.users.clone()),
            courses: courses::CoursesService::new(
                stores.courses.clone(),
                stores.enrollments.clone(),
                stores.users,
            ),
            lessons: lessons::LessonsService::new(stores.lessons, stores.courses, stores.enrollments),
            images: images::ImageService::new(
                storage_config.images_dir.clone(),
                &server_config.public_url,
            ),
        }
    }
}
