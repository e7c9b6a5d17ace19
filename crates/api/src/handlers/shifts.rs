//! Shift handlers: creation, editing, rider and staff binding, publication,
//! and the operator dashboard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pickup_core::time_input::parse_date_time;
use pickup_core::types::DbId;
use pickup_db::models::shift::ShiftPatch;
use pickup_scheduler::SchedulerError;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /admin/shifts`.
#[derive(Debug, Deserialize)]
pub struct CreateShiftBody {
    pub driver_id: DbId,
    /// `YYYY-MM-DD HH:MM:SS`, airport-local.
    pub departure_time: String,
}

/// Body for `PUT /admin/shifts/{id}`. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateShiftBody {
    pub driver_id: Option<DbId>,
    pub departure_time: Option<String>,
}

/// Body for the assign-student and remove-student actions.
#[derive(Debug, Deserialize)]
pub struct StudentBody {
    pub request_id: DbId,
}

/// Body for the assign-staff and remove-staff actions.
#[derive(Debug, Deserialize)]
pub struct StaffBody {
    pub staff_id: DbId,
}

/// Response for `POST /admin/shifts/{id}/publish`.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub shift_id: DbId,
    pub published_requests: u64,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /admin/shifts/dashboard
pub async fn dashboard(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let shifts = state.shifts.dashboard().await?;
    tracing::debug!(count = shifts.len(), "Loaded shift dashboard");
    Ok(Json(DataResponse { data: shifts }))
}

/// GET /admin/requests/pending
pub async fn pending_requests(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = state.shifts.pending_requests().await?;
    Ok(Json(DataResponse { data: requests }))
}

// ---------------------------------------------------------------------------
// Shift CRUD
// ---------------------------------------------------------------------------

/// POST /admin/shifts
pub async fn create_shift(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateShiftBody>,
) -> AppResult<impl IntoResponse> {
    let departure_time = parse_date_time("departure_time", &body.departure_time)
        .map_err(SchedulerError::from)?;
    let shift = state
        .shifts
        .create_shift(body.driver_id, departure_time)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: shift })))
}

/// PUT /admin/shifts/{id}
pub async fn update_shift(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<UpdateShiftBody>,
) -> AppResult<impl IntoResponse> {
    let departure_time = body
        .departure_time
        .as_deref()
        .map(|raw| parse_date_time("departure_time", raw))
        .transpose()
        .map_err(SchedulerError::from)?;
    let patch = ShiftPatch {
        driver_id: body.driver_id,
        departure_time,
    };
    let shift = state.shifts.update_shift(id, &patch).await?;
    Ok(Json(DataResponse { data: shift }))
}

/// POST /admin/shifts/{id}/publish
pub async fn publish_shift(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let published_requests = state.shifts.publish_shift(id).await?;
    Ok(Json(DataResponse {
        data: PublishResponse {
            shift_id: id,
            published_requests,
        },
    }))
}

// ---------------------------------------------------------------------------
// Riders
// ---------------------------------------------------------------------------

/// POST /admin/shifts/{id}/assign-student
///
/// Over-capacity assignments still succeed; the returned `warning` is the
/// only signal.
pub async fn assign_student(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<StudentBody>,
) -> AppResult<impl IntoResponse> {
    let result = state.shifts.assign_student(id, body.request_id).await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /admin/shifts/{id}/remove-student
///
/// Answers `{"data": {}}`, the same envelope as a warning-free assign.
pub async fn remove_student(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<StudentBody>,
) -> AppResult<impl IntoResponse> {
    state.shifts.remove_student(id, body.request_id).await?;
    Ok(Json(DataResponse { data: json!({}) }))
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// POST /admin/shifts/{id}/assign-staff
pub async fn assign_staff(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<StaffBody>,
) -> AppResult<impl IntoResponse> {
    state.shifts.assign_staff(id, body.staff_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/shifts/{id}/remove-staff
pub async fn remove_staff(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<StaffBody>,
) -> AppResult<impl IntoResponse> {
    state.shifts.remove_staff(id, body.staff_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
