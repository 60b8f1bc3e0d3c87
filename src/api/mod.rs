//! API handlers for Coursify REST endpoints

pub mod auth;
pub mod courses;
pub mod health;
pub mod images;
pub mod lessons;
pub mod openapi;
pub mod users;


use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// Identity of the caller, bound by [`require_basic_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))
    }
}

/// Basic auth middleware: verifies the `Authorization` header and binds the
/// caller's id to the request, or answers 401 before any handler runs.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user_id = state.services.auth.verify(authorization).await?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

/// JSON body whose decoding errors become 400 responses
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose parsing errors become 400 responses
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query parameters whose parsing errors become 400 responses
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Empty JSON object (`{}`)
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyResponse {}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        // Courses
        .route("/courses/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/:id/enter/", post(courses::enter_course))
        .route("/courses/:id/leave/", post(courses::leave_course))
        .route(
            "/courses/:id/mentors/",
            get(courses::list_mentors).post(courses::assign_mentor),
        )
        .route("/courses/:id/mentors/:user_id", delete(courses::remove_mentor))
        // Lessons
        .route("/lessons/", get(lessons::list_lessons).post(lessons::create_lesson))
        .route(
            "/lessons/:id",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        )
        // Users
        .route("/users/", get(users::list_users))
        .route("/users/self/", get(users::get_self).put(users::update_self))
        .route("/users/:id", get(users::get_user))
        .route("/login/", get(auth::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_basic_auth));

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/register/", post(auth::register))
        .route(
            "/fs/images/",
            post(images::upload_image)
                .layer(DefaultBodyLimit::max(state.config.storage.max_upload_bytes)),
        )
        .route("/fs/images/:name", get(images::serve_image));

    let request_timeout = state.config.server.request_timeout();

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
}
