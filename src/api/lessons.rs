//! Lesson endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        lesson::{CreateLesson, LessonQuery, UpdateLesson},
        page::query_flag,
        Lesson, ListMeta, Page,
    },
    AppState,
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, EmptyResponse};

/// Paginated lesson list
#[derive(Serialize, ToSchema)]
pub struct LessonList {
    pub lessons: Vec<Lesson>,
    pub meta: ListMeta,
}

/// List the lessons of a course in order
#[utoipa::path(
    get,
    path = "/lessons/",
    tag = "lessons",
    security(("basic_auth" = [])),
    params(LessonQuery),
    responses(
        (status = 200, description = "List of lessons", body = LessonList),
        (status = 400, description = "Missing or malformed courseId")
    )
)]
pub async fn list_lessons(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
    ApiQuery(query): ApiQuery<LessonQuery>,
) -> AppResult<Json<LessonList>> {
    let course_id = query
        .course_id
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("courseId must be an integer".to_string()))?;
    let page = Page::from_query(query.limit.as_deref(), query.offset.as_deref());

    let (lessons, total) = state
        .services
        .lessons
        .list(course_id, page, query_flag(query.total.as_deref()))
        .await?;

    Ok(Json(LessonList {
        lessons,
        meta: ListMeta::new(page, total),
    }))
}

/// Create a lesson at the end of a course (owner or mentor)
#[utoipa::path(
    post,
    path = "/lessons/",
    tag = "lessons",
    security(("basic_auth" = [])),
    request_body = CreateLesson,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 403, description = "Caller cannot edit this course"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateLesson>,
) -> AppResult<(StatusCode, Json<Lesson>)> {
    let lesson = state.services.lessons.create(user_id, data).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Get lesson by ID
#[utoipa::path(
    get,
    path = "/lessons/{id}",
    tag = "lessons",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson", body = Lesson),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Lesson>> {
    let lesson = state.services.lessons.get_by_id(id).await?;
    Ok(Json(lesson))
}

/// Update a lesson (owner or mentor)
#[utoipa::path(
    put,
    path = "/lessons/{id}",
    tag = "lessons",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Lesson ID")),
    request_body = UpdateLesson,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 403, description = "Caller cannot edit this course"),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(data): ApiJson<UpdateLesson>,
) -> AppResult<Json<Lesson>> {
    let lesson = state.services.lessons.update(id, user_id, data).await?;
    Ok(Json(lesson))
}

/// Delete a lesson (owner or mentor)
#[utoipa::path(
    delete,
    path = "/lessons/{id}",
    tag = "lessons",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson deleted or already absent", body = EmptyResponse),
        (status = 403, description = "Caller cannot edit this course")
    )
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<EmptyResponse>> {
    state.services.lessons.delete(id, user_id).await?;
    Ok(Json(EmptyResponse {}))
}
