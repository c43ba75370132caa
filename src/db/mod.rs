//! SQLite persistence.
//!
//! [`db::Db`] opens a connection and brings the schema up to date through
//! [`migrations`]. The stores wrap a connection each:
//!
//! - [`attendance::AttendanceStore`]: daily attendance records and their breaks
//! - [`employees::Employees`]: the employee directory
//!
//! Attendance rows are not tied to the employees table, so removing an
//! employee keeps their history.

pub mod attendance;
pub mod db;
pub mod employees;
pub mod migrations;
