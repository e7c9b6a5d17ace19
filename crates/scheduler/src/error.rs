//! Error type shared by the scheduling services.

use pickup_core::error::CoreError;
use pickup_core::types::DbId;

/// PostgreSQL SQLSTATEs that indicate a retryable conflict rather than a
/// caller mistake: lock_not_available, deadlock_detected,
/// serialization_failure.
const TRANSIENT_SQLSTATES: [&str; 3] = ["55P03", "40P01", "40001"];

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("User already has a request")]
    AlreadyHasRequest,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request {0} not found")]
    NotFound(DbId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Shift {0} not found")]
    ShiftNotFound(DbId),

    #[error("Request {0} not found")]
    RequestNotFound(DbId),

    #[error("Request {0} is not pending")]
    RequestNotPending(DbId),

    #[error("Request {0} is already bound to a shift")]
    RequestAlreadyBound(DbId),

    #[error("Request {request_id} is not bound to shift {shift_id}")]
    BindingNotFound { shift_id: DbId, request_id: DbId },

    #[error("Driver {0} not found")]
    DriverNotFound(DbId),

    #[error("User {0} not found")]
    UserNotFound(DbId),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("User {0} is not staff")]
    NotStaffRole(DbId),

    #[error("Cannot change the role of admin user {0}")]
    CannotChangeAdmin(DbId),

    #[error("Transient database failure, safe to retry: {0}")]
    Transient(sqlx::Error),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl SchedulerError {
    /// Stable machine-readable code for the operator UI.
    pub fn code(&self) -> &'static str {
        match self {
            SchedulerError::AlreadyHasRequest => "ALREADY_HAS_REQUEST",
            SchedulerError::InvalidInput(_) => "INVALID_INPUT",
            SchedulerError::NotFound(_) => "NOT_FOUND",
            SchedulerError::InvalidState(_) => "INVALID_STATE",
            SchedulerError::ShiftNotFound(_) => "SHIFT_NOT_FOUND",
            SchedulerError::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            SchedulerError::RequestNotPending(_) => "REQUEST_NOT_PENDING",
            SchedulerError::RequestAlreadyBound(_) => "REQUEST_ALREADY_BOUND",
            SchedulerError::BindingNotFound { .. } => "BINDING_NOT_FOUND",
            SchedulerError::DriverNotFound(_) => "DRIVER_NOT_FOUND",
            SchedulerError::UserNotFound(_) => "USER_NOT_FOUND",
            SchedulerError::NoFieldsToUpdate => "NO_FIELDS_TO_UPDATE",
            SchedulerError::NotStaffRole(_) => "NOT_STAFF_ROLE",
            SchedulerError::CannotChangeAdmin(_) => "CANNOT_CHANGE_ADMIN",
            SchedulerError::Transient(_) => "RETRYABLE",
            SchedulerError::Database(_) => "INTERNAL_ERROR",
        }
    }

    /// Caller errors are detected before any write and abort cleanly.
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            SchedulerError::Transient(_) | SchedulerError::Database(_)
        )
    }

    /// The whole operation may be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::Transient(_))
    }
}

impl From<sqlx::Error> for SchedulerError {
    fn from(err: sqlx::Error) -> Self {
        let transient = match &err {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .is_some_and(|code| TRANSIENT_SQLSTATES.contains(&code.as_ref())),
            sqlx::Error::PoolTimedOut => true,
            _ => false,
        };
        if transient {
            SchedulerError::Transient(err)
        } else {
            SchedulerError::Database(err)
        }
    }
}

impl From<CoreError> for SchedulerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => SchedulerError::InvalidInput(msg),
            other => SchedulerError::InvalidState(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for SchedulerError {
    fn from(errs: validator::ValidationErrors) -> Self {
        SchedulerError::InvalidInput(errs.to_string())
    }
}
