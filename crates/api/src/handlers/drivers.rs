//! Driver profile handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pickup_core::types::DbId;
use pickup_db::models::driver::DriverInput;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin/drivers
pub async fn list_drivers(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let drivers = state.shifts.list_drivers().await?;
    Ok(Json(DataResponse { data: drivers }))
}

/// POST /admin/drivers
pub async fn create_driver(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    AppJson(input): AppJson<DriverInput>,
) -> AppResult<impl IntoResponse> {
    let driver = state.shifts.create_driver(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: driver })))
}

/// PUT /admin/drivers/{id}
///
/// Replaces the whole profile, capacity limits included.
pub async fn update_driver(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DriverInput>,
) -> AppResult<impl IntoResponse> {
    let driver = state.shifts.update_driver(id, &input).await?;
    Ok(Json(DataResponse { data: driver }))
}
