//! Course endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        course::{AssignMentor, CourseFilter, CourseQuery, CreateCourse, UpdateCourse},
        page::query_flag,
        Course, CourseDetails, CourseScope, ListMeta, Mentor, Page,
    },
    AppState,
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, EmptyResponse};

/// Paginated course list
#[derive(Serialize, ToSchema)]
pub struct CourseList {
    pub courses: Vec<Course>,
    pub meta: ListMeta,
}

/// List courses: every course, the caller's enrollments or the courses the caller runs
#[utoipa::path(
    get,
    path = "/courses/",
    tag = "courses",
    security(("basic_auth" = [])),
    params(CourseQuery),
    responses(
        (status = 200, description = "List of courses", body = CourseList),
        (status = 400, description = "Unknown list type"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiQuery(query): ApiQuery<CourseQuery>,
) -> AppResult<Json<CourseList>> {
    let scope = query
        .scope
        .as_deref()
        .unwrap_or("all")
        .parse::<CourseScope>()
        .map_err(AppError::BadRequest)?;
    let page = Page::from_query(query.limit.as_deref(), query.offset.as_deref());
    let filter = CourseFilter {
        scope,
        viewer_id: user_id,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let (courses, total) = state
        .services
        .courses
        .list(&filter, page, query_flag(query.total.as_deref()))
        .await?;

    Ok(Json(CourseList {
        courses,
        meta: ListMeta::new(page, total),
    }))
}

/// Create a course owned by the caller
#[utoipa::path(
    post,
    path = "/courses/",
    tag = "courses",
    security(("basic_auth" = [])),
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created", body = CourseDetails),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateCourse>,
) -> AppResult<(StatusCode, Json<CourseDetails>)> {
    let course = state.services.courses.create(user_id, data).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Get course details by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseDetails),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<CourseDetails>> {
    let course = state.services.courses.get(id, user_id).await?;
    Ok(Json(course))
}

/// Update a course (owner only)
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated", body = CourseDetails),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(data): ApiJson<UpdateCourse>,
) -> AppResult<Json<CourseDetails>> {
    let course = state.services.courses.update(id, user_id, data).await?;
    Ok(Json(course))
}

/// Delete a course (owner only)
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted or already absent", body = EmptyResponse),
        (status = 403, description = "Caller is not the owner")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<EmptyResponse>> {
    state.services.courses.delete(id, user_id).await?;
    Ok(Json(EmptyResponse {}))
}

/// Enroll the caller in a course
#[utoipa::path(
    post,
    path = "/courses/{id}/enter/",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Caller enrolled", body = CourseDetails),
        (status = 404, description = "Course not found")
    )
)]
pub async fn enter_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<CourseDetails>> {
    let course = state.services.courses.enter(id, user_id).await?;
    Ok(Json(course))
}

/// Drop the caller's enrollment
#[utoipa::path(
    post,
    path = "/courses/{id}/leave/",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Caller no longer enrolled", body = CourseDetails),
        (status = 404, description = "Course not found")
    )
)]
pub async fn leave_course(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<CourseDetails>> {
    let course = state.services.courses.leave(id, user_id).await?;
    Ok(Json(course))
}

/// List the mentors of a course
#[utoipa::path(
    get,
    path = "/courses/{id}/mentors/",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Mentors", body = Vec<Mentor>),
        (status = 404, description = "Course not found")
    )
)]
pub async fn list_mentors(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Vec<Mentor>>> {
    let mentors = state.services.courses.mentors(id).await?;
    Ok(Json(mentors))
}

/// Assign a mentor role (owner only)
#[utoipa::path(
    post,
    path = "/courses/{id}/mentors/",
    tag = "courses",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Course ID")),
    request_body = AssignMentor,
    responses(
        (status = 200, description = "Mentors after the assignment", body = Vec<Mentor>),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Course or user not found")
    )
)]
pub async fn assign_mentor(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(data): ApiJson<AssignMentor>,
) -> AppResult<Json<Vec<Mentor>>> {
    let mentors = state.services.courses.assign_mentor(id, user_id, data).await?;
    Ok(Json(mentors))
}

/// Remove a mentor (owner only)
#[utoipa::path(
    delete,
    path = "/courses/{id}/mentors/{user_id}",
    tag = "courses",
    security(("basic_auth" = [])),
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("user_id" = i64, Path, description = "Mentor's user ID")
    ),
    responses(
        (status = 200, description = "Mentor removed", body = EmptyResponse),
        (status = 403, description = "Caller is not the owner")
    )
)]
pub async fn remove_mentor(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath((id, mentor_id)): ApiPath<(i64, i64)>,
) -> AppResult<Json<EmptyResponse>> {
    state.services.courses.remove_mentor(id, user_id, mentor_id).await?;
    Ok(Json(EmptyResponse {}))
}
