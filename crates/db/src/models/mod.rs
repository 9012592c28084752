//! Row models and input DTOs, one module per table.

pub mod reservation;
pub mod room;
pub mod room_restriction;
pub mod status;
pub mod user;
