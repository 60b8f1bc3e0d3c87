//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, courses, health, images, lessons, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coursify API",
        version = "1.0.0",
        description = "Online course platform REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        // Users
        users::list_users,
        users::get_self,
        users::update_self,
        users::get_user,
        // Courses
        courses::list_courses,
        courses::create_course,
        courses::get_course,
        courses::update_course,
        courses::delete_course,
        courses::enter_course,
        courses::leave_course,
        courses::list_mentors,
        courses::assign_mentor,
        courses::remove_mentor,
        // Lessons
        lessons::list_lessons,
        lessons::create_lesson,
        lessons::get_lesson,
        lessons::update_lesson,
        lessons::delete_lesson,
        // Images
        images::upload_image,
        images::serve_image,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateProfile,
            users::UserList,
            // Courses
            crate::models::course::Course,
            crate::models::course::CourseDetails,
            crate::models::course::Mentor,
            crate::models::course::CreateCourse,
            crate::models::course::UpdateCourse,
            crate::models::course::AssignMentor,
            courses::CourseList,
            // Lessons
            crate::models::lesson::Lesson,
            crate::models::lesson::CreateLesson,
            crate::models::lesson::UpdateLesson,
            lessons::LessonList,
            // Common
            crate::models::page::ListMeta,
            crate::api::EmptyResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and credential check"),
        (name = "users", description = "User profiles"),
        (name = "courses", description = "Courses, enrollments and mentors"),
        (name = "lessons", description = "Lessons within a course"),
        (name = "images", description = "Image storage")
    )
)]
pub struct ApiDoc;

/// Registers the HTTP Basic scheme referenced by `security(("basic_auth" = []))`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
