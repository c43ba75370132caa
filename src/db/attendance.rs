//! Persistence of attendance records.
//!
//! A record is one `attendance` row keyed by `(employee_id, attendance_date)`
//! plus its ordered `break_events`. The derived totals and the status are
//! stored alongside the raw timestamps so reports can query them directly,
//! but on load they are recomputed from the events and the row values are
//! only used as a cross-check.
//!
//! [`AttendanceStore::update`] reads and writes a record inside one
//! `BEGIN IMMEDIATE` transaction. SQLite lets a single connection hold the
//! write lock at a time, so read-modify-write cycles from separate processes
//! on the same database file never interleave.

use crate::db::db::Db;
use crate::libs::attendance::{AttendanceRecord, BreakEvent, EmployeeId, RecordParts};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, warn};

const SELECT_RECORD: &str = "SELECT id, clock_in, clock_out, had_skew, status FROM attendance
    WHERE employee_id = ?1 AND attendance_date = ?2";
const SELECT_DAY: &str = "SELECT id, employee_id, clock_in, clock_out, had_skew, status FROM attendance
    WHERE attendance_date = ?1 ORDER BY employee_id";
const SELECT_BREAKS: &str = "SELECT start, end FROM break_events WHERE attendance_id = ?1 ORDER BY seq";
const UPSERT_RECORD: &str = "INSERT INTO attendance
    (employee_id, attendance_date, clock_in, clock_out, total_break, total_work, net_work, status, had_skew, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, CURRENT_TIMESTAMP)
    ON CONFLICT (employee_id, attendance_date) DO UPDATE SET
        clock_in = excluded.clock_in,
        clock_out = excluded.clock_out,
        total_break = excluded.total_break,
        total_work = excluded.total_work,
        net_work = excluded.net_work,
        status = excluded.status,
        had_skew = excluded.had_skew,
        updated_at = CURRENT_TIMESTAMP";
const SELECT_ID: &str = "SELECT id FROM attendance WHERE employee_id = ?1 AND attendance_date = ?2";
const DELETE_BREAKS: &str = "DELETE FROM break_events WHERE attendance_id = ?1";
const INSERT_BREAK: &str = "INSERT INTO break_events (attendance_id, seq, start, end) VALUES (?1, ?2, ?3, ?4)";

/// Raw attendance row before its breaks are attached.
struct StoredRow {
    id: i64,
    employee_id: EmployeeId,
    clock_in: Option<NaiveDateTime>,
    clock_out: Option<NaiveDateTime>,
    had_skew: bool,
    status: String,
}

pub struct AttendanceStore {
    conn: Connection,
}

impl AttendanceStore {
    /// Opens the store on the configured database.
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        AttendanceStore { conn: db.conn }
    }

    /// Loads the record for `employee_id` on `date`, if one was ever saved.
    pub fn load(&self, employee_id: EmployeeId, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        load_record(&self.conn, employee_id, date)
    }

    /// Every record stored for `date`, ordered by employee.
    pub fn fetch_day(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(SELECT_DAY)?;
        let rows = stmt
            .query_map(params![date], |row| {
                Ok(StoredRow {
                    id: row.get(0)?,
                    employee_id: row.get(1)?,
                    clock_in: row.get(2)?,
                    clock_out: row.get(3)?,
                    had_skew: row.get(4)?,
                    status: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(|row| assemble(&self.conn, row, date)).collect()
    }

    /// Writes `record` and replaces its break list in one transaction.
    pub fn save(&self, record: &AttendanceRecord) -> Result<()> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        write_record(&tx, record)?;
        tx.commit()?;
        Ok(())
    }

    /// Loads one record, hands it to `change` and saves what comes back, all
    /// under a single write lock on the database.
    ///
    /// `change` receives `None` when no record exists yet. When it returns an
    /// error the transaction is rolled back and nothing is written.
    pub fn update<T, E>(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        change: impl FnOnce(Option<AttendanceRecord>) -> Result<(AttendanceRecord, T), E>,
    ) -> Result<(AttendanceRecord, T), E>
    where
        E: From<anyhow::Error>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate).map_err(anyhow::Error::from)?;
        let current = load_record(&tx, employee_id, date)?;
        let (record, outcome) = change(current)?;
        write_record(&tx, &record)?;
        tx.commit().map_err(anyhow::Error::from)?;
        Ok((record, outcome))
    }
}

fn load_record(conn: &Connection, employee_id: EmployeeId, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
    let row = conn
        .query_row(SELECT_RECORD, params![employee_id, date], |row| {
            Ok(StoredRow {
                id: row.get(0)?,
                employee_id,
                clock_in: row.get(1)?,
                clock_out: row.get(2)?,
                had_skew: row.get(3)?,
                status: row.get(4)?,
            })
        })
        .optional()?;

    row.map(|row| assemble(conn, row, date)).transpose()
}

fn write_record(conn: &Connection, record: &AttendanceRecord) -> Result<()> {
    conn.execute(
        UPSERT_RECORD,
        params![
            record.employee_id(),
            record.attendance_date(),
            record.clock_in(),
            record.clock_out(),
            record.total_break_duration().num_seconds(),
            record.total_work_duration().map(|d| d.num_seconds()),
            record.net_work_duration().map(|d| d.num_seconds()),
            record.status().as_str(),
            record.had_skew(),
        ],
    )?;
    let id: i64 = conn.query_row(SELECT_ID, params![record.employee_id(), record.attendance_date()], |row| row.get(0))?;

    conn.execute(DELETE_BREAKS, [id])?;
    for (seq, event) in record.break_events().iter().enumerate() {
        conn.execute(INSERT_BREAK, params![id, seq as i64, event.start, event.end])?;
    }

    debug!(
        employee_id = record.employee_id(),
        date = %record.attendance_date(),
        status = %record.status(),
        breaks = record.break_events().len(),
        "attendance record written"
    );
    Ok(())
}

fn assemble(conn: &Connection, row: StoredRow, date: NaiveDate) -> Result<AttendanceRecord> {
    let mut stmt = conn.prepare_cached(SELECT_BREAKS)?;
    let break_events = stmt
        .query_map([row.id], |r| Ok(BreakEvent { start: r.get(0)?, end: r.get(1)? }))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let record = AttendanceRecord::restore(RecordParts {
        employee_id: row.employee_id,
        attendance_date: date,
        clock_in: row.clock_in,
        clock_out: row.clock_out,
        break_events,
        had_skew: row.had_skew,
    })
    .with_context(|| format!("attendance record {} for employee {} on {}", row.id, row.employee_id, date))?;

    if record.status().as_str() != row.status {
        warn!(
            employee_id = row.employee_id,
            %date,
            stored = %row.status,
            derived = %record.status(),
            "stored attendance status disagrees with its events"
        );
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::attendance::{AttendanceStatus, AttendanceTracker};
    use crate::libs::error::AttendanceError;

    fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        day.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_save_and_load_keeps_break_order() {
        let store = AttendanceStore::with_db(Db::open_in_memory().unwrap());
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let tracker = AttendanceTracker::default();
        let mut record = AttendanceRecord::new(1, day);

        tracker.clock_in(&mut record, at(day, 9, 0)).unwrap();
        tracker.break_start(&mut record, at(day, 10, 0)).unwrap();
        tracker.break_end(&mut record, at(day, 10, 15)).unwrap();
        tracker.break_start(&mut record, at(day, 12, 0)).unwrap();
        store.save(&record).unwrap();

        let loaded = store.load(1, day).unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.status(), AttendanceStatus::OnBreak);
        assert_eq!(loaded.break_events()[0].start, at(day, 10, 0));

        tracker.break_end(&mut record, at(day, 12, 30)).unwrap();
        store.save(&record).unwrap();
        let loaded = store.load(1, day).unwrap().unwrap();
        assert_eq!(loaded.total_break_duration().num_minutes(), 45);
        assert!(store.load(2, day).unwrap().is_none());
    }

    #[test]
    fn test_update_writes_nothing_when_change_fails() {
        let store = AttendanceStore::with_db(Db::open_in_memory().unwrap());
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let tracker = AttendanceTracker::default();

        let (record, ()) = store
            .update(1, day, |current| {
                let mut record = current.unwrap_or_else(|| AttendanceRecord::new(1, day));
                tracker.clock_in(&mut record, at(day, 9, 0))?;
                Ok::<_, AttendanceError>((record, ()))
            })
            .unwrap();
        assert_eq!(store.load(1, day).unwrap(), Some(record.clone()));

        let err = store
            .update(1, day, |current| {
                let mut record = current.unwrap();
                tracker.break_start(&mut record, at(day, 12, 0))?;
                Err::<(AttendanceRecord, ()), _>(AttendanceError::Inconsistent("abandoned"))
            })
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Inconsistent(_)));
        assert_eq!(store.load(1, day).unwrap(), Some(record));
    }
}
