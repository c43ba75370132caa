//! # Timecard - employee attendance tracking
//!
//! A command-line time clock: employees clock in, take breaks and clock
//! out, and the day's break, work and net work time is derived from those
//! events.
//!
//! ## Features
//!
//! - **Attendance state machine**: `NotPresent → Active ⇄ OnBreak → DayOver`
//! - **Clock skew handling**: late-arriving events are clamped or rejected
//! - **Employee directory**: validated create, edit and delete
//! - **Daily sheet**: everyone's status and running totals for a date
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
