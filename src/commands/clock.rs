//! Attendance transitions from the command line.
//!
//! `in`, `out`, `break start` and `break end` act on one employee's record
//! for a day. The event time defaults to the local wall clock; `--at`
//! records an earlier or later time on the same day, e.g. when someone
//! forgot to clock out.

use crate::db::employees::Employees;
use crate::libs::attendance::{AttendanceRecord, EmployeeId, Transition};
use crate::libs::employee::Employee;
use crate::libs::formatter::{format_optional_duration, format_time};
use crate::libs::messages::Message;
use crate::libs::timeclock::TimeClock;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ClockArgs {
    /// Employee id
    employee_id: EmployeeId,

    #[arg(long, short, default_value = "today", help = "Attendance date (YYYY-MM-DD or 'today')")]
    date: String,

    #[arg(long, help = "Event time (HH:MM or HH:MM:SS), defaults to now")]
    at: Option<String>,
}

#[derive(Debug, Args)]
pub struct BreakArgs {
    #[command(subcommand)]
    command: BreakCommand,
}

#[derive(Debug, Subcommand)]
enum BreakCommand {
    /// Start a break
    Start(ClockArgs),
    /// End the running break
    End(ClockArgs),
}

pub fn clock_in(args: ClockArgs) -> Result<()> {
    let (employee, date, now) = resolve(&args)?;
    let (record, transition) = TimeClock::open()?.clock_in(employee.id, date, now)?;

    report_skew(&transition);
    msg_success!(Message::ClockedIn(employee.full_name(), format_time(record.clock_in())));
    Ok(())
}

pub fn clock_out(args: ClockArgs) -> Result<()> {
    let (employee, date, now) = resolve(&args)?;
    let (record, transition) = TimeClock::open()?.clock_out(employee.id, date, now)?;

    report_skew(&transition);
    msg_success!(Message::ClockedOut(
        employee.full_name(),
        format_time(record.clock_out()),
        format_optional_duration(record.net_work_duration())
    ));
    Ok(())
}

pub fn breaks(args: BreakArgs) -> Result<()> {
    match args.command {
        BreakCommand::Start(args) => {
            let (employee, date, now) = resolve(&args)?;
            let (record, transition) = TimeClock::open()?.break_start(employee.id, date, now)?;

            report_skew(&transition);
            let started = record.open_break().map(|b| b.start);
            msg_success!(Message::BreakStarted(employee.full_name(), format_time(started)));
        }
        BreakCommand::End(args) => {
            let (employee, date, now) = resolve(&args)?;
            let (record, transition) = TimeClock::open()?.break_end(employee.id, date, now)?;

            report_skew(&transition);
            let (ended, length) = last_break(&record);
            msg_success!(Message::BreakEnded(employee.full_name(), ended, length));
        }
    }
    Ok(())
}

/// Parses `YYYY-MM-DD` or `today`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}

/// The event time: `at` on `date`, or the current local time.
///
/// Without `--at`, an attendance date other than today still uses the
/// current time of day, so late corrections should pass `--at`.
pub fn resolve_now(date: NaiveDate, at: Option<&str>) -> Result<NaiveDateTime> {
    let Some(at) = at else {
        let now = Local::now().naive_local();
        return Ok(date.and_time(now.time()));
    };
    let time = NaiveTime::parse_from_str(at, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(at, "%H:%M"))
        .map_err(|_| msg_error_anyhow!(Message::InvalidTime(at.to_string())))?;
    Ok(date.and_time(time))
}

/// Looks up an employee, failing with a user-facing message when absent.
pub fn find_employee(employee_id: EmployeeId) -> Result<Employee> {
    match Employees::new()?.get(employee_id)? {
        Some(employee) => Ok(employee),
        None => msg_bail_anyhow!(Message::EmployeeNotFound(employee_id)),
    }
}

fn resolve(args: &ClockArgs) -> Result<(Employee, NaiveDate, NaiveDateTime)> {
    let employee = find_employee(args.employee_id)?;
    let date = parse_date(&args.date)?;
    let now = resolve_now(date, args.at.as_deref())?;
    Ok((employee, date, now))
}

fn report_skew(transition: &Transition) {
    if let Some(skew) = &transition.skew {
        msg_warning!(Message::ClockSkewClamped(skew.to_string()));
    }
}

fn last_break(record: &AttendanceRecord) -> (String, String) {
    match record.break_events().last() {
        Some(event) => (format_time(event.end), format_optional_duration(event.duration())),
        None => (format_time(None), format_optional_duration(None)),
    }
}
