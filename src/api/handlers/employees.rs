use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::api::response::ApiError;
use crate::store::{Employee, EmployeeUpdate, StoreError};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub removed: Employee,
}

struct PhotoUpload {
    data: Bytes,
    original_name: String,
}

/// Text fields and the optional photo file collected from a multipart body.
#[derive(Default)]
struct EmployeeForm {
    id: Option<String>,
    name: Option<String>,
    mobile: Option<String>,
    address: Option<String>,
    photo: Option<PhotoUpload>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_employees(State(state): State<Arc<AppState>>) -> Json<Vec<Employee>> {
    Json(state.employees.list())
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    state
        .employees
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Employee not found."))
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let form = read_form(multipart).await?;

    let (Some(id), Some(name), Some(mobile), Some(address)) = (
        present(form.id),
        present(form.name),
        present(form.mobile),
        present(form.address),
    ) else {
        return Err(ApiError::bad_request("All fields are required."));
    };

    let photo = match form.photo {
        Some(upload) => state
            .photos
            .store(upload.data, &upload.original_name)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to store photo: {e}")))?,
        None => String::new(),
    };

    let employee = Employee {
        id,
        name,
        mobile,
        address,
        photo: photo.clone(),
    };

    match state.employees.insert(employee) {
        Ok(created) => {
            tracing::debug!(employee_id = %created.id, "Created employee");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(StoreError::DuplicateId(_)) => {
            // The record was never committed, so the fresh upload is an orphan.
            if !photo.is_empty() {
                state.photos.remove(&photo).await;
            }
            Err(ApiError::bad_request("Employee ID already exists."))
        }
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Employee>, ApiError> {
    let form = read_form(multipart).await?;

    let existing = state
        .employees
        .get(&id)
        .ok_or_else(|| ApiError::not_found("Employee not found."))?;

    let (Some(name), Some(mobile), Some(address)) = (
        present(form.name),
        present(form.mobile),
        present(form.address),
    ) else {
        return Err(ApiError::bad_request("Name, mobile and address are required."));
    };

    let new_photo = match form.photo {
        Some(upload) => Some(
            state
                .photos
                .store(upload.data, &upload.original_name)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to store photo: {e}")))?,
        ),
        None => None,
    };

    let changes = EmployeeUpdate {
        name,
        mobile,
        address,
        photo: new_photo.clone(),
    };

    let updated = match state.employees.update(&id, changes) {
        Ok(updated) => updated,
        Err(StoreError::NotFound(_)) => {
            // The record vanished between lookup and commit.
            if let Some(ref photo) = new_photo {
                state.photos.remove(photo).await;
            }
            return Err(ApiError::not_found("Employee not found."));
        }
        Err(e) => return Err(ApiError::internal(e.to_string())),
    };

    // The old file goes away only after the new reference is committed, so a
    // record never points at a deleted photo.
    if new_photo.is_some() && !existing.photo.is_empty() {
        state.photos.remove(&existing.photo).await;
    }

    tracing::debug!(employee_id = %id, "Updated employee");
    Ok(Json(updated))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = match state.employees.delete(&id) {
        Ok(removed) => removed,
        Err(StoreError::NotFound(_)) => {
            return Err(ApiError::not_found("Employee not found."));
        }
        Err(e) => return Err(ApiError::internal(e.to_string())),
    };

    if !removed.photo.is_empty() {
        state.photos.remove(&removed.photo).await;
    }

    tracing::debug!(employee_id = %id, "Deleted employee");
    Ok(Json(DeleteResponse {
        success: true,
        removed,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

async fn read_form(mut multipart: Multipart) -> Result<EmployeeForm, ApiError> {
    let mut form = EmployeeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "id" => {
                form.id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid id: {e}")))?,
                );
            }
            "name" => {
                form.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid name: {e}")))?,
                );
            }
            "mobile" => {
                form.mobile = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid mobile: {e}")))?,
                );
            }
            "address" => {
                form.address = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid address: {e}")))?,
                );
            }
            "photo" => {
                let original_name = field.file_name().unwrap_or("photo").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read photo: {e}")))?;

                // An empty file part counts as "no upload".
                if !data.is_empty() {
                    form.photo = Some(PhotoUpload {
                        data,
                        original_name,
                    });
                }
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    Ok(form)
}

/// A field counts as present only if it is non-empty after trimming. The
/// stored value keeps the client's original spacing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
