use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::api::response::ApiError;
use crate::photos::PhotoStoreError;
use crate::AppState;

/// Serve a stored photo's raw bytes.
/// Route: GET /uploads/:filename
pub async fn serve_photo(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.photos.read(&filename).await.map_err(|e| match e {
        PhotoStoreError::NotFound(_) => ApiError::not_found("Photo not found."),
        _ => ApiError::internal(format!("Failed to read photo: {e}")),
    })?;

    let mime_type = mime_guess::from_path(&filename)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let byte_size = data.len() as u64;
    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_str(mime_type)
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(header::CONTENT_LENGTH, header::HeaderValue::from(byte_size));

    Ok(response)
}
