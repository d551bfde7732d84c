//! Business operations over the employee and attendance tables.
//!
//! Each function validates its input, runs against the pool inside its own
//! transaction or single statement, and reports failures as [`AppError`](crate::error::AppError).

pub mod attendance;
pub mod employee;
pub mod stats;
