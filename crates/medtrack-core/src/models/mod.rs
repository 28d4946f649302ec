//! Domain models for medtrack.

mod appointment;
mod date;
mod exam;
mod medication;
mod user;

pub use appointment::*;
pub use date::*;
pub use exam::*;
pub use medication::*;
pub use user::*;
