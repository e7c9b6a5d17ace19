//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is involved.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use pickup_api::error::AppError;
use pickup_core::error::CoreError;
use pickup_scheduler::SchedulerError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// CoreError
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("departure_time: bad".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["error"], "departure_time: bad");
}

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("admin role required".into())))
            .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// SchedulerError
// ---------------------------------------------------------------------------

#[tokio::test]
async fn caller_errors_return_400_with_their_code() {
    let cases = [
        (SchedulerError::AlreadyHasRequest, "ALREADY_HAS_REQUEST"),
        (SchedulerError::ShiftNotFound(3), "SHIFT_NOT_FOUND"),
        (SchedulerError::RequestNotPending(4), "REQUEST_NOT_PENDING"),
        (
            SchedulerError::BindingNotFound {
                shift_id: 1,
                request_id: 2,
            },
            "BINDING_NOT_FOUND",
        ),
        (SchedulerError::NotStaffRole(5), "NOT_STAFF_ROLE"),
        (SchedulerError::CannotChangeAdmin(6), "CANNOT_CHANGE_ADMIN"),
    ];

    for (err, code) in cases {
        let message = err.to_string();
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(json["code"], code);
        assert_eq!(json["error"], message);
    }
}

#[tokio::test]
async fn transient_error_returns_503_retryable() {
    let err = AppError::Scheduler(SchedulerError::Transient(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "RETRYABLE");
    assert_eq!(json["error"], "The resource is busy, please retry");
}

#[tokio::test]
async fn scheduler_database_error_is_sanitized() {
    let err = AppError::Scheduler(SchedulerError::Database(sqlx::Error::PoolClosed));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

#[test]
fn errors_convert_into_their_variant() {
    assert_matches!(
        AppError::from(sqlx::Error::RowNotFound),
        AppError::Database(sqlx::Error::RowNotFound)
    );
    assert_matches!(
        AppError::from(SchedulerError::NoFieldsToUpdate),
        AppError::Scheduler(SchedulerError::NoFieldsToUpdate)
    );
    assert_matches!(
        AppError::from(CoreError::Forbidden("staff".into())),
        AppError::Core(CoreError::Forbidden(msg)) if msg == "staff"
    );
}

#[tokio::test]
async fn core_and_scheduler_validation_share_a_code() {
    let core = AppError::Core(CoreError::Validation("terminal: empty".into()));
    let scheduler: AppError =
        SchedulerError::from(CoreError::Validation("terminal: empty".into())).into();
    assert_matches!(&scheduler, AppError::Scheduler(SchedulerError::InvalidInput(_)));

    let (core_status, core_json) = error_to_response(core).await;
    let (scheduler_status, scheduler_json) = error_to_response(scheduler).await;

    assert_eq!(core_status, StatusCode::BAD_REQUEST);
    assert_eq!(scheduler_status, core_status);
    assert_eq!(core_json["code"], "INVALID_INPUT");
    assert_eq!(scheduler_json["code"], core_json["code"]);
}
