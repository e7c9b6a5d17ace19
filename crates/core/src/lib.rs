//! Pure domain logic for the airport pickup scheduler.
//!
//! Nothing in this crate touches the database or the network, so it can be
//! shared by the repository layer, the transactional services, and the HTTP
//! surface alike.

pub mod buffer;
pub mod capacity;
pub mod error;
pub mod roles;
pub mod time_input;
pub mod types;
