//! Core library modules.
//!
//! - [`attendance`]: the attendance state machine and duration math
//! - [`timeclock`]: transitions applied to stored records under per-record locks
//! - [`employee`]: employee directory entries and validation
//! - [`config`], [`data_storage`]: settings and where files live
//! - [`messages`], [`formatter`], [`view`]: everything the CLI prints
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use timecard::db::{attendance::AttendanceStore, db::Db};
//! use timecard::libs::{attendance::AttendanceTracker, locks::RecordLocks, timeclock::TimeClock};
//!
//! let clock = TimeClock::new(
//!     AttendanceStore::with_db(Db::open_in_memory()?),
//!     Arc::new(RecordLocks::new()),
//!     AttendanceTracker::default(),
//! );
//! let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! clock.clock_in(1, day, day.and_hms_opt(9, 0, 0).unwrap())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod attendance;
pub mod config;
pub mod data_storage;
pub mod employee;
pub mod error;
pub mod formatter;
pub mod locks;
pub mod messages;
pub mod timeclock;
pub mod view;
