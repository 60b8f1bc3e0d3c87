//! Image upload and retrieval endpoints

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::{
    error::{AppError, AppResult},
    services::images::IMAGES_ROUTE,
    AppState,
};

/// Store the raw request body as an image and return its public URL as plain text
#[utoipa::path(
    post,
    path = "/fs/images/",
    tag = "images",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Public URL of the stored image", body = String, content_type = "text/plain"),
        (status = 400, description = "Empty body"),
        (status = 413, description = "Body too large")
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<String> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let url = state.services.images.save(&body, content_type).await?;
    Ok(url)
}

/// Serve a stored image
#[utoipa::path(
    get,
    path = "/fs/images/{name}",
    tag = "images",
    params(("name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "No such image")
    )
)]
pub async fn serve_image(State(state): State<AppState>, request: Request) -> AppResult<Response> {
    // ServeDir resolves the still-encoded tail and refuses anything outside the directory
    let (mut parts, body) = request.into_parts();
    let tail = parts
        .uri
        .path()
        .strip_prefix(IMAGES_ROUTE)
        .unwrap_or_default()
        .to_string();
    parts.uri = Uri::try_from(tail).map_err(|_| AppError::NotFound("No such image".to_string()))?;

    let request = Request::from_parts(parts, body);
    match ServeDir::new(state.services.images.dir()).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
