//! Per-record serialization for attendance transitions.
//!
//! Transitions on the same `(employee_id, date)` record must be applied one
//! at a time: two concurrent clock-ins would otherwise both load an empty
//! record and both succeed. [`RecordLocks`] hands out one mutex per record
//! key. Different records never wait on each other.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timecard::libs::locks::RecordLocks;
//!
//! let locks = RecordLocks::new();
//! let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let answer = locks.with_record((7, day), || 42);
//! assert_eq!(answer, 42);
//! assert_eq!(locks.tracked(), 0);
//! ```

use crate::libs::attendance::EmployeeId;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifies one attendance record.
pub type RecordKey = (EmployeeId, NaiveDate);

/// Registry of per-record locks, shared between callers through an `Arc`.
///
/// Slots are created on demand and dropped again once no caller holds or
/// waits on them, so the registry only grows with the number of records
/// being worked on concurrently.
#[derive(Debug, Default)]
pub struct RecordLocks {
    slots: Mutex<HashMap<RecordKey, Arc<Mutex<()>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `key`.
    pub fn with_record<R>(&self, key: RecordKey, f: impl FnOnce() -> R) -> R {
        let slot = Arc::clone(self.slots.lock().entry(key).or_default());

        let result = {
            let _guard = slot.lock();
            f()
        };

        drop(slot);
        // A count of one means only the registry still references the slot.
        self.slots.lock().retain(|_, slot| Arc::strong_count(slot) > 1);
        result
    }

    /// Number of record keys currently held or waited on.
    pub fn tracked(&self) -> usize {
        self.slots.lock().len()
    }
}
