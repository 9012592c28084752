//! Domain building blocks for the bookings application.
//!
//! This crate has no internal dependencies and no I/O: it holds the shared
//! id/timestamp types, the domain error enum, calendar date ranges, guest form
//! validation, the booking draft state machine, and the admin calendar math.

pub mod booking;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod forms;
pub mod types;
