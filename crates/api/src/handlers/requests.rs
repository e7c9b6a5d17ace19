//! Rider-facing request handlers.
//!
//! The acting rider is always the bearer of the token; request ids in the
//! path are only ever matched against that rider's own rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pickup_core::types::DbId;
use pickup_scheduler::{CreateRequestInput, UpdateRequestInput};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /student/requests
// ---------------------------------------------------------------------------

/// Create the caller's pickup request.
pub async fn create_request(
    RequireStudent(rider): RequireStudent,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRequestInput>,
) -> AppResult<impl IntoResponse> {
    let request = state.requests.create_request(rider.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

// ---------------------------------------------------------------------------
// GET /student/requests/my
// ---------------------------------------------------------------------------

/// List the caller's requests. Shift details appear once published.
pub async fn list_my_requests(
    RequireStudent(rider): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.requests.list_my_requests(rider.user_id).await?;
    tracing::debug!(rider_id = rider.user_id, count = items.len(), "Listed rider requests");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// PUT /student/requests/{id}
// ---------------------------------------------------------------------------

/// Edit a request that has not been published yet.
pub async fn update_request(
    RequireStudent(rider): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRequestInput>,
) -> AppResult<impl IntoResponse> {
    let request = state
        .requests
        .update_pending_request(rider.user_id, id, &input)
        .await?;
    Ok(Json(DataResponse { data: request }))
}
