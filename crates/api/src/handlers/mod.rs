pub mod drivers;
pub mod requests;
pub mod shifts;
pub mod users;
