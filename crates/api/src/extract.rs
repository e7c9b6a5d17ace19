//! Request extractors with the application's error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections are [`AppError`]s, so a malformed or
/// incomplete body answers `400 {"error", "code": "INVALID_INPUT"}` instead
/// of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
