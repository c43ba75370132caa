//! Attendance time-tracking state machine.
//!
//! An [`AttendanceRecord`] describes one employee's working day. It moves
//! through a fixed lifecycle driven by four transitions applied by an
//! [`AttendanceTracker`]:
//!
//! ```text
//! NotPresent ──clock-in──▶ Active ──break-start──▶ OnBreak
//!                            ▲  │                     │
//!                            │  └────break-end◀──────┘
//!                            │
//!                      clock-out (from Active or OnBreak)
//!                            ▼
//!                         DayOver (terminal)
//! ```
//!
//! The tracker never reads a wall clock. Every transition receives the
//! event time as an explicit `now`, which keeps the arithmetic deterministic
//! and lets callers replay events in tests.
//!
//! ## Durations
//!
//! - **Break time**: sum of closed breaks, recomputed whenever a break closes.
//! - **Work time**: `clock_out - clock_in`, set once at clock-out.
//! - **Net time**: work time minus break time, clamped at zero.
//!
//! Durations are `chrono::Duration` values. Turning them into `H:MM:SS`
//! strings is left to [`crate::libs::formatter`].
//!
//! ## Clock skew
//!
//! A supplied `now` that precedes the latest timestamp already recorded is
//! clock skew. Under [`SkewPolicy::Clamp`] the event is pinned to that latest
//! timestamp (producing zero-length breaks or zero extra work), the record's
//! `had_skew` flag is raised and the [`Transition`] carries the details.
//! A clock-out that precedes the clock-in itself is pinned to the clock-in,
//! so the day settles with zero work and zero net time.
//! Under [`SkewPolicy::Reject`] the transition fails with
//! [`AttendanceError::ClockSkew`] and the record is left untouched.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timecard::libs::attendance::{AttendanceRecord, AttendanceStatus, AttendanceTracker};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! let tracker = AttendanceTracker::default();
//! let mut record = AttendanceRecord::new(7, day);
//!
//! tracker.clock_in(&mut record, day.and_hms_opt(9, 0, 0).unwrap()).unwrap();
//! tracker.break_start(&mut record, day.and_hms_opt(12, 0, 0).unwrap()).unwrap();
//! tracker.break_end(&mut record, day.and_hms_opt(12, 30, 0).unwrap()).unwrap();
//! tracker.clock_out(&mut record, day.and_hms_opt(17, 0, 0).unwrap()).unwrap();
//!
//! assert_eq!(record.status(), AttendanceStatus::DayOver);
//! assert_eq!(record.net_work_duration().unwrap().num_minutes(), 7 * 60 + 30);
//! ```

use crate::libs::error::AttendanceError;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an employee owned by the employee directory.
pub type EmployeeId = i64;

/// Where an attendance record currently sits in its daily lifecycle.
///
/// Serialized with the spellings the dashboard has always used, so
/// `OnBreak` travels as `"inactive"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    NotPresent,
    Active,
    #[serde(rename = "inactive")]
    OnBreak,
    DayOver,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::NotPresent => "not-present",
            AttendanceStatus::Active => "active",
            AttendanceStatus::OnBreak => "inactive",
            AttendanceStatus::DayOver => "day-over",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four operations that move a record through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ClockIn,
    BreakStart,
    BreakEnd,
    ClockOut,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::ClockIn => "clock in",
            Action::BreakStart => "start a break",
            Action::BreakEnd => "end a break",
            Action::ClockOut => "clock out",
        };
        f.write_str(name)
    }
}

/// One pause in work. `end` stays `None` while the break is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvent {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl BreakEvent {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Length of a closed break, `None` while it is still running.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| (end - self.start).max(Duration::zero()))
    }

    /// Length of the break as seen at `now`, counting a running break up to `now`.
    pub fn duration_at(&self, now: NaiveDateTime) -> Duration {
        (self.end.unwrap_or(now) - self.start).max(Duration::zero())
    }
}

/// Details of an out-of-order event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSkew {
    /// The transition that received the skewed time.
    pub action: Action,
    /// Latest timestamp already on the record.
    pub reference: NaiveDateTime,
    /// The time the caller supplied.
    pub supplied: NaiveDateTime,
}

impl ClockSkew {
    /// How far the supplied time lags behind the record.
    pub fn lag(&self) -> Duration {
        self.reference - self.supplied
    }
}

impl fmt::Display for ClockSkew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot {} at {}, the record already has an event at {}",
            self.action,
            self.supplied.format("%Y-%m-%d %H:%M:%S"),
            self.reference.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// How the tracker reacts to an event time earlier than the record's latest timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkewPolicy {
    /// Pin the event to the latest timestamp and flag the record.
    #[default]
    Clamp,
    /// Refuse the transition.
    Reject,
}

/// How clock-out behaves while a break is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakAtClockOut {
    /// Close the running break at the clock-out time, then clock out.
    #[default]
    AutoClose,
    /// Refuse to clock out until the break is ended explicitly.
    Reject,
}

/// Tunable rules for an [`AttendanceTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerPolicy {
    #[serde(default)]
    pub skew: SkewPolicy,
    #[serde(default)]
    pub break_at_clock_out: BreakAtClockOut,
}

/// Outcome of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub from: AttendanceStatus,
    pub to: AttendanceStatus,
    /// Present when the supplied time was clamped.
    pub skew: Option<ClockSkew>,
}

/// Raw fields of a stored record, used to rebuild an [`AttendanceRecord`].
///
/// Derived totals are not part of the parts: they are recomputed from the
/// timestamps so a stale stored total can never leak back into the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordParts {
    pub employee_id: EmployeeId,
    pub attendance_date: NaiveDate,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub break_events: Vec<BreakEvent>,
    pub had_skew: bool,
}

/// One employee's attendance for one calendar day.
///
/// Fields are private: the record changes only through an
/// [`AttendanceTracker`], which keeps the invariants below intact.
///
/// - no clock-in means no breaks and no clock-out;
/// - a clock-out means every break is closed and the record is final;
/// - at most one break is open, and it is the last one;
/// - closed breaks never end before they start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    employee_id: EmployeeId,
    attendance_date: NaiveDate,
    clock_in: Option<NaiveDateTime>,
    clock_out: Option<NaiveDateTime>,
    break_events: Vec<BreakEvent>,
    total_break_duration: Duration,
    total_work_duration: Option<Duration>,
    net_work_duration: Option<Duration>,
    had_skew: bool,
}

impl AttendanceRecord {
    /// Creates an empty record in the `NotPresent` state.
    pub fn new(employee_id: EmployeeId, attendance_date: NaiveDate) -> Self {
        Self {
            employee_id,
            attendance_date,
            clock_in: None,
            clock_out: None,
            break_events: Vec::new(),
            total_break_duration: Duration::zero(),
            total_work_duration: None,
            net_work_duration: None,
            had_skew: false,
        }
    }

    /// Rebuilds a record from stored parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::Inconsistent`] when the parts describe a
    /// record that the tracker could never have produced.
    pub fn restore(parts: RecordParts) -> Result<Self, AttendanceError> {
        let RecordParts {
            employee_id,
            attendance_date,
            clock_in,
            clock_out,
            break_events,
            had_skew,
        } = parts;

        let Some(started) = clock_in else {
            if clock_out.is_some() || !break_events.is_empty() {
                return Err(AttendanceError::Inconsistent("activity recorded without a clock-in"));
            }
            return Ok(Self::new(employee_id, attendance_date));
        };

        if let Some((_, earlier)) = break_events.split_last() {
            if earlier.iter().any(BreakEvent::is_open) {
                return Err(AttendanceError::Inconsistent("only the latest break may be open"));
            }
        }
        if break_events.iter().any(|b| b.end.is_some_and(|end| end < b.start)) {
            return Err(AttendanceError::Inconsistent("break ends before it starts"));
        }
        if clock_out.is_some() && break_events.last().is_some_and(BreakEvent::is_open) {
            return Err(AttendanceError::Inconsistent("clocked-out record has an open break"));
        }

        let mut record = Self {
            employee_id,
            attendance_date,
            clock_in: Some(started),
            clock_out,
            break_events,
            total_break_duration: Duration::zero(),
            total_work_duration: None,
            net_work_duration: None,
            had_skew,
        };
        record.total_break_duration = record.closed_break_total();
        if let Some(finished) = clock_out {
            record.settle(started, finished);
        }
        Ok(record)
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn attendance_date(&self) -> NaiveDate {
        self.attendance_date
    }

    pub fn clock_in(&self) -> Option<NaiveDateTime> {
        self.clock_in
    }

    pub fn clock_out(&self) -> Option<NaiveDateTime> {
        self.clock_out
    }

    pub fn break_events(&self) -> &[BreakEvent] {
        &self.break_events
    }

    /// The running break, if any.
    pub fn open_break(&self) -> Option<&BreakEvent> {
        self.break_events.last().filter(|b| b.is_open())
    }

    /// Sum of closed breaks. A running break is not included until it ends.
    pub fn total_break_duration(&self) -> Duration {
        self.total_break_duration
    }

    /// `clock_out - clock_in`, available once the day is over.
    pub fn total_work_duration(&self) -> Option<Duration> {
        self.total_work_duration
    }

    /// Work time minus break time, never negative. Available once the day is over.
    pub fn net_work_duration(&self) -> Option<Duration> {
        self.net_work_duration
    }

    /// Whether any transition on this record had its time clamped.
    pub fn had_skew(&self) -> bool {
        self.had_skew
    }

    pub fn status(&self) -> AttendanceStatus {
        match (self.clock_in, self.clock_out) {
            (None, _) => AttendanceStatus::NotPresent,
            (Some(_), Some(_)) => AttendanceStatus::DayOver,
            (Some(_), None) if self.open_break().is_some() => AttendanceStatus::OnBreak,
            (Some(_), None) => AttendanceStatus::Active,
        }
    }

    /// Break time as seen at `now`, including a running break.
    pub fn break_duration_at(&self, now: NaiveDateTime) -> Duration {
        self.break_events.iter().map(|b| b.duration_at(now)).fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Net work time as seen at `now`. Finished days report their settled value.
    pub fn net_work_at(&self, now: NaiveDateTime) -> Duration {
        if let Some(net) = self.net_work_duration {
            return net;
        }
        match self.clock_in {
            Some(started) => ((now - started) - self.break_duration_at(now)).max(Duration::zero()),
            None => Duration::zero(),
        }
    }

    /// Serializable snapshot for the presentation layer, durations in seconds.
    pub fn summary(&self, now: NaiveDateTime) -> AttendanceSummary {
        AttendanceSummary {
            employee_id: self.employee_id,
            attendance_date: self.attendance_date,
            status: self.status(),
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            breaks: self.break_events.clone(),
            break_seconds: self.break_duration_at(now).num_seconds(),
            work_seconds: self.total_work_duration.map(|d| d.num_seconds()),
            net_work_seconds: self.net_work_at(now).num_seconds(),
            had_skew: self.had_skew,
        }
    }

    /// Latest timestamp recorded so far, the floor for any new event.
    fn latest_timestamp(&self) -> Option<NaiveDateTime> {
        self.break_events
            .iter()
            .flat_map(|b| [Some(b.start), b.end])
            .chain([self.clock_in, self.clock_out])
            .flatten()
            .max()
    }

    fn closed_break_total(&self) -> Duration {
        self.break_events.iter().filter_map(BreakEvent::duration).fold(Duration::zero(), |acc, d| acc + d)
    }

    fn settle(&mut self, started: NaiveDateTime, finished: NaiveDateTime) {
        let work = (finished - started).max(Duration::zero());
        self.total_work_duration = Some(work);
        self.net_work_duration = Some((work - self.total_break_duration).max(Duration::zero()));
    }
}

/// JSON-friendly view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub employee_id: EmployeeId,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub breaks: Vec<BreakEvent>,
    pub break_seconds: i64,
    pub work_seconds: Option<i64>,
    pub net_work_seconds: i64,
    pub had_skew: bool,
}

/// Applies the attendance transitions under a [`TrackerPolicy`].
///
/// The tracker is stateless apart from its policy and performs no I/O, so a
/// single value can be shared freely. Callers are responsible for applying
/// at most one transition per record at a time (see
/// [`crate::libs::locks::RecordLocks`]).
///
/// Every operation validates before it mutates: on `Err` the record is
/// exactly as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceTracker {
    policy: TrackerPolicy,
}

impl AttendanceTracker {
    pub fn new(policy: TrackerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TrackerPolicy {
        self.policy
    }

    /// Starts the working day. Only valid from `NotPresent`.
    pub fn clock_in(
        &self,
        record: &mut AttendanceRecord,
        now: NaiveDateTime,
    ) -> Result<Transition, AttendanceError> {
        let from = record.status();
        if from != AttendanceStatus::NotPresent {
            return Err(invalid(Action::ClockIn, from));
        }

        record.clock_in = Some(now);
        Ok(finish(Action::ClockIn, from, record, None))
    }

    /// Opens a break. Only valid from `Active`.
    pub fn break_start(
        &self,
        record: &mut AttendanceRecord,
        now: NaiveDateTime,
    ) -> Result<Transition, AttendanceError> {
        let from = record.status();
        if from != AttendanceStatus::Active {
            return Err(invalid(Action::BreakStart, from));
        }

        let (at, skew) = self.resolve(record, Action::BreakStart, now)?;
        record.break_events.push(BreakEvent { start: at, end: None });
        Ok(finish(Action::BreakStart, from, record, skew))
    }

    /// Closes the running break and refreshes the break total. Only valid from `OnBreak`.
    pub fn break_end(
        &self,
        record: &mut AttendanceRecord,
        now: NaiveDateTime,
    ) -> Result<Transition, AttendanceError> {
        let from = record.status();
        if from != AttendanceStatus::OnBreak {
            return Err(invalid(Action::BreakEnd, from));
        }

        let (at, skew) = self.resolve(record, Action::BreakEnd, now)?;
        record.close_open_break(at);
        Ok(finish(Action::BreakEnd, from, record, skew))
    }

    /// Ends the working day and settles work and net time.
    ///
    /// Valid from `Active`, and from `OnBreak` when the policy auto-closes
    /// the running break at the clock-out time.
    pub fn clock_out(
        &self,
        record: &mut AttendanceRecord,
        now: NaiveDateTime,
    ) -> Result<Transition, AttendanceError> {
        let from = record.status();
        let allowed = match from {
            AttendanceStatus::Active => true,
            AttendanceStatus::OnBreak => self.policy.break_at_clock_out == BreakAtClockOut::AutoClose,
            AttendanceStatus::NotPresent | AttendanceStatus::DayOver => false,
        };
        let Some(started) = record.clock_in.filter(|_| allowed) else {
            return Err(invalid(Action::ClockOut, from));
        };

        let (at, skew) = self.resolve(record, Action::ClockOut, now)?;
        if from == AttendanceStatus::OnBreak {
            record.close_open_break(at);
        }
        // A clock-out before the clock-in ends the day with no work at all.
        let finished = if now < started { started } else { at };
        record.clock_out = Some(finished);
        record.settle(started, finished);
        Ok(finish(Action::ClockOut, from, record, skew))
    }

    /// Picks the effective event time, applying the skew policy.
    fn resolve(
        &self,
        record: &AttendanceRecord,
        action: Action,
        now: NaiveDateTime,
    ) -> Result<(NaiveDateTime, Option<ClockSkew>), AttendanceError> {
        match record.latest_timestamp() {
            Some(reference) if now < reference => {
                let skew = ClockSkew {
                    action,
                    reference,
                    supplied: now,
                };
                match self.policy.skew {
                    SkewPolicy::Clamp => Ok((reference, Some(skew))),
                    SkewPolicy::Reject => Err(AttendanceError::ClockSkew(skew)),
                }
            }
            _ => Ok((now, None)),
        }
    }
}

impl AttendanceRecord {
    fn close_open_break(&mut self, at: NaiveDateTime) {
        if let Some(open) = self.break_events.last_mut().filter(|b| b.is_open()) {
            open.end = Some(at);
        }
        self.total_break_duration = self.closed_break_total();
    }
}

fn invalid(action: Action, status: AttendanceStatus) -> AttendanceError {
    AttendanceError::InvalidTransition { action, status }
}

fn finish(
    action: Action,
    from: AttendanceStatus,
    record: &mut AttendanceRecord,
    skew: Option<ClockSkew>,
) -> Transition {
    record.had_skew |= skew.is_some();
    Transition {
        action,
        from,
        to: record.status(),
        skew,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_status_follows_lifecycle() {
        let tracker = AttendanceTracker::default();
        let mut record = AttendanceRecord::new(1, day());
        assert_eq!(record.status(), AttendanceStatus::NotPresent);

        let t = tracker.clock_in(&mut record, at(9, 0)).unwrap();
        assert_eq!((t.from, t.to), (AttendanceStatus::NotPresent, AttendanceStatus::Active));

        let t = tracker.break_start(&mut record, at(10, 0)).unwrap();
        assert_eq!(t.to, AttendanceStatus::OnBreak);

        let t = tracker.break_end(&mut record, at(10, 10)).unwrap();
        assert_eq!(t.to, AttendanceStatus::Active);

        let t = tracker.clock_out(&mut record, at(17, 0)).unwrap();
        assert_eq!(t.to, AttendanceStatus::DayOver);
        assert!(t.skew.is_none());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(AttendanceStatus::NotPresent.to_string(), "not-present");
        assert_eq!(AttendanceStatus::OnBreak.to_string(), "inactive");
        assert_eq!(serde_json::to_string(&AttendanceStatus::OnBreak).unwrap(), "\"inactive\"");
        assert_eq!(serde_json::to_string(&AttendanceStatus::DayOver).unwrap(), "\"day-over\"");
    }

    #[test]
    fn test_break_total_counts_only_closed_breaks() {
        let tracker = AttendanceTracker::default();
        let mut record = AttendanceRecord::new(1, day());
        tracker.clock_in(&mut record, at(9, 0)).unwrap();
        tracker.break_start(&mut record, at(10, 0)).unwrap();
        tracker.break_end(&mut record, at(10, 20)).unwrap();
        tracker.break_start(&mut record, at(13, 0)).unwrap();

        assert_eq!(record.total_break_duration(), Duration::minutes(20));
        assert_eq!(record.break_duration_at(at(13, 30)), Duration::minutes(50));
        assert_eq!(record.net_work_at(at(13, 30)), Duration::minutes(4 * 60 + 30 - 50));
    }

    #[test]
    fn test_clamped_break_end_is_zero_length() {
        let tracker = AttendanceTracker::default();
        let mut record = AttendanceRecord::new(1, day());
        tracker.clock_in(&mut record, at(9, 0)).unwrap();
        tracker.break_start(&mut record, at(12, 0)).unwrap();

        let t = tracker.break_end(&mut record, at(11, 50)).unwrap();
        let skew = t.skew.unwrap();
        assert_eq!(skew.reference, at(12, 0));
        assert_eq!(skew.lag(), Duration::minutes(10));
        assert_eq!(record.break_events()[0].end, Some(at(12, 0)));
        assert_eq!(record.total_break_duration(), Duration::zero());
        assert!(record.had_skew());
    }

    #[test]
    fn test_restore_rejects_open_break_after_clock_out() {
        let parts = RecordParts {
            employee_id: 1,
            attendance_date: day(),
            clock_in: Some(at(9, 0)),
            clock_out: Some(at(17, 0)),
            break_events: vec![BreakEvent { start: at(12, 0), end: None }],
            had_skew: false,
        };
        assert!(matches!(AttendanceRecord::restore(parts), Err(AttendanceError::Inconsistent(_))));
    }

    #[test]
    fn test_restore_recomputes_totals() {
        let parts = RecordParts {
            employee_id: 1,
            attendance_date: day(),
            clock_in: Some(at(9, 0)),
            clock_out: Some(at(17, 0)),
            break_events: vec![
                BreakEvent { start: at(12, 0), end: Some(at(12, 45)) },
                BreakEvent { start: at(15, 0), end: Some(at(15, 15)) },
            ],
            had_skew: false,
        };
        let record = AttendanceRecord::restore(parts).unwrap();
        assert_eq!(record.total_break_duration(), Duration::hours(1));
        assert_eq!(record.total_work_duration(), Some(Duration::hours(8)));
        assert_eq!(record.net_work_duration(), Some(Duration::hours(7)));
    }
}
