//! Transactional scheduling services.
//!
//! - [`request_service::RequestService`] -- rider request lifecycle.
//! - [`assignment::AssignmentEngine`] -- binds/unbinds a request to a shift
//!   under row locks and reports soft capacity overloads.
//! - [`shift_admin::ShiftAdminService`] -- shift, staff and driver
//!   administration, including publication.
//! - [`flight_sync::FlightSyncService`] -- best-effort refresh of arrival
//!   times from an external flight data provider.
//!
//! Every multi-statement mutation runs in a single transaction. Dropping an
//! uncommitted [`pickup_db::DbTransaction`] rolls it back, so a cancelled
//! caller never leaves a partial write behind.

pub mod assignment;
pub mod error;
pub mod flight_sync;
pub mod request_service;
pub mod shift_admin;

pub use assignment::{AssignmentEngine, AssignmentResult};
pub use error::{SchedulerError, SchedulerResult};
pub use flight_sync::{FlightSyncReport, FlightSyncService};
pub use request_service::{CreateRequestInput, RequestService, UpdateRequestInput};
pub use shift_admin::ShiftAdminService;

/// Default upper bound on waiting for a row lock, in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;
