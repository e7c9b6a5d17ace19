//! User role administration. Admin only.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use pickup_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = state.shifts.list_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /admin/users/{id}/set-staff
pub async fn set_staff(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.shifts.set_user_staff(id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "Staff role granted");
    Ok(Json(DataResponse { data: user }))
}

/// POST /admin/users/{id}/unset-staff
pub async fn unset_staff(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.shifts.unset_user_staff(id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "Staff role revoked");
    Ok(Json(DataResponse { data: user }))
}
