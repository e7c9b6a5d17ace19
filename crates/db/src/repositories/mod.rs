//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! either `&PgPool` or, for statements that must share a caller's
//! transaction, `&mut DbTransaction`.

pub mod driver_repo;
pub mod request_repo;
pub mod shift_repo;
pub mod shift_request_repo;
pub mod shift_staff_repo;
pub mod user_repo;

pub use driver_repo::DriverRepo;
pub use request_repo::RequestRepo;
pub use shift_repo::ShiftRepo;
pub use shift_request_repo::ShiftRequestRepo;
pub use shift_staff_repo::ShiftStaffRepo;
pub use user_repo::UserRepo;
