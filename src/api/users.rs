//! User profile endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        user::{UpdateProfile, UserFilter, UserQuery},
        ListMeta, Page, User,
    },
    AppState,
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser};

/// Paginated user list
#[derive(Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<User>,
    pub meta: ListMeta,
}

/// List users with search and pagination
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    security(("basic_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "List of users", body = UserList),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> AppResult<Json<UserList>> {
    let page = Page::from_query(query.limit.as_deref(), query.offset.as_deref());
    let filter = UserFilter {
        search: query.search.filter(|s| !s.is_empty()),
    };

    let (users, total) = state.services.users.search(&filter, page).await?;

    Ok(Json(UserList {
        users,
        meta: ListMeta::new(page, Some(total)),
    }))
}

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/users/self/",
    tag = "users",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_self(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(user_id).await?;
    Ok(Json(user))
}

/// Update own profile (name, avatar, about)
#[utoipa::path(
    put,
    path = "/users/self/",
    tag = "users",
    security(("basic_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn update_self(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiJson(profile): ApiJson<UpdateProfile>,
) -> AppResult<Json<User>> {
    let user = state.services.users.update_profile(user_id, profile).await?;
    Ok(Json(user))
}

/// Public profile of any user
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}
