//! Handlers for device CRUD.
//!
//! Create and update bodies reach these handlers only after the validation
//! middleware has accepted them.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use devreg_core::device::CreateUpdateDevice;
use devreg_core::error::CoreError;
use devreg_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedDevice {
    pub id: DbId,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Device",
        id,
    })
}

/// GET /api/devices
pub async fn list_devices(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.devices.list().await;
    Ok(Json(DataResponse { data: devices }))
}

/// GET /api/devices/{id}
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let device = state
        .devices
        .get(device_id)
        .await
        .ok_or_else(|| not_found(device_id))?;

    Ok(Json(DataResponse { data: device }))
}

/// POST /api/devices
///
/// Returns 201 with the new id and a `Location` header.
pub async fn create_device(
    State(state): State<AppState>,
    Json(input): Json<CreateUpdateDevice>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let device = state.devices.create(input).await;
    tracing::info!(
        device_id = device.id,
        device_type = %device.device_type_name,
        "Device created"
    );

    let location = format!("/api/devices/{}", device.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DataResponse {
            data: CreatedDevice { id: device.id },
        }),
    ))
}

/// PUT /api/devices/{id}
pub async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<DbId>,
    Json(input): Json<CreateUpdateDevice>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    state
        .devices
        .update(device_id, input)
        .await
        .ok_or_else(|| not_found(device_id))?;

    tracing::info!(device_id, "Device updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/devices/{id}
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.devices.delete(device_id).await {
        return Err(not_found(device_id));
    }

    tracing::info!(device_id, "Device deleted");

    Ok(StatusCode::NO_CONTENT)
}
