//! Typed errors for attendance tracking and the employee directory.

use crate::libs::attendance::{Action, AttendanceStatus, ClockSkew, EmployeeId};
use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the attendance state machine and the time clock around it.
///
/// Transition errors are always raised before the record is touched.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// The operation is not allowed from the record's current state.
    #[error("cannot {action} while {status}")]
    InvalidTransition { action: Action, status: AttendanceStatus },

    /// The supplied time precedes the record's latest event and the policy rejects skew.
    #[error("clock skew: {0}")]
    ClockSkew(ClockSkew),

    /// The record store has no record for this employee and day.
    #[error("no attendance record for employee {employee_id} on {date}")]
    RecordNotFound { employee_id: EmployeeId, date: NaiveDate },

    /// A stored record breaks the attendance invariants.
    #[error("inconsistent attendance record: {0}")]
    Inconsistent(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Failures of employee directory operations.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("employee {0} not found")]
    NotFound(EmployeeId),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}
