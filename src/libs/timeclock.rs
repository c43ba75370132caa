//! The time clock: attendance transitions applied to stored records.
//!
//! [`TimeClock`] ties the pure [`AttendanceTracker`] to an
//! [`AttendanceStore`]. Every operation loads the employee's record for the
//! day, applies one transition and writes the result back while holding that
//! record's lock, so concurrent requests for the same employee and day are
//! applied one after another. Requests for different records never wait on
//! each other.
//!
//! The in-process lock only covers clocks sharing one [`RecordLocks`]. The
//! load and save also run in one immediate transaction through
//! [`AttendanceStore::update`], which keeps separate processes on the same
//! database from applying the same transition twice.
//!
//! A rejected transition leaves the stored record untouched.

use crate::db::attendance::AttendanceStore;
use crate::libs::attendance::{Action, AttendanceRecord, AttendanceTracker, EmployeeId, Transition};
use crate::libs::config::Config;
use crate::libs::error::AttendanceError;
use crate::libs::locks::RecordLocks;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{info, warn};

pub struct TimeClock {
    store: AttendanceStore,
    locks: Arc<RecordLocks>,
    tracker: AttendanceTracker,
}

impl TimeClock {
    /// Builds a time clock. Clocks sharing `locks` serialize updates to the same record.
    pub fn new(store: AttendanceStore, locks: Arc<RecordLocks>, tracker: AttendanceTracker) -> Self {
        Self { store, locks, tracker }
    }

    /// Opens the configured database with the configured tracker policy.
    pub fn open() -> anyhow::Result<Self> {
        let policy = Config::read()?.tracker;
        Ok(Self::new(
            AttendanceStore::new()?,
            Arc::new(RecordLocks::new()),
            AttendanceTracker::new(policy),
        ))
    }

    /// Clocks the employee in, creating the day's record on first use.
    pub fn clock_in(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, Transition), AttendanceError> {
        self.apply(employee_id, date, Action::ClockIn, now)
    }

    pub fn break_start(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, Transition), AttendanceError> {
        self.apply(employee_id, date, Action::BreakStart, now)
    }

    pub fn break_end(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, Transition), AttendanceError> {
        self.apply(employee_id, date, Action::BreakEnd, now)
    }

    pub fn clock_out(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, Transition), AttendanceError> {
        self.apply(employee_id, date, Action::ClockOut, now)
    }

    /// The stored record for one employee and day.
    pub fn record(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        Ok(self.store.load(employee_id, date)?)
    }

    /// All records stored for `date`.
    pub fn day(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self.store.fetch_day(date)?)
    }

    fn apply(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        action: Action,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, Transition), AttendanceError> {
        self.locks.with_record((employee_id, date), || {
            let (record, transition) = self.store.update(employee_id, date, |current| -> Result<_, AttendanceError> {
                let mut record = match current {
                    Some(record) => record,
                    None if action == Action::ClockIn => AttendanceRecord::new(employee_id, date),
                    None => return Err(AttendanceError::RecordNotFound { employee_id, date }),
                };

                let transition = match action {
                    Action::ClockIn => self.tracker.clock_in(&mut record, now),
                    Action::BreakStart => self.tracker.break_start(&mut record, now),
                    Action::BreakEnd => self.tracker.break_end(&mut record, now),
                    Action::ClockOut => self.tracker.clock_out(&mut record, now),
                }?;
                Ok((record, transition))
            })?;

            if let Some(skew) = &transition.skew {
                warn!(employee_id, %date, %skew, "event time clamped");
            }
            info!(
                employee_id,
                %date,
                action = %transition.action,
                from = %transition.from,
                to = %transition.to,
                "attendance updated"
            );
            Ok((record, transition))
        })
    }
}
