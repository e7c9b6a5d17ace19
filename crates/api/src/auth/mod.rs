//! Authentication primitives.
//!
//! - [`jwt`] -- access-token generation and validation.
//!
//! Login and token issuance live in a separate identity service; this server
//! only verifies the tokens it is handed.

pub mod jwt;
