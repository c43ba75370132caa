//! One employee's attendance for a day, as a table or as JSON.

use super::clock::{find_employee, parse_date};
use crate::libs::attendance::{AttendanceRecord, EmployeeId};
use crate::libs::messages::Message;
use crate::libs::timeclock::TimeClock;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Employee id
    employee_id: EmployeeId,

    #[arg(long, short, default_value = "today", help = "Attendance date (YYYY-MM-DD or 'today')")]
    date: String,

    /// Print the record summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: StatusArgs) -> Result<()> {
    let employee = find_employee(args.employee_id)?;
    let date = parse_date(&args.date)?;
    let now = Local::now().naive_local();
    let record = TimeClock::open()?.record(employee.id, date)?;

    if args.json {
        // Days without a record are reported as an untouched record.
        let record = record.unwrap_or_else(|| AttendanceRecord::new(employee.id, date));
        println!("{}", serde_json::to_string_pretty(&record.summary(now))?);
        return Ok(());
    }

    match record {
        Some(record) => {
            msg_print!(Message::AttendanceStatusHeader(employee.full_name(), date.format("%B %-d, %Y").to_string()), true);
            View::record(&record, now);
        }
        None => msg_info!(Message::AttendanceNotFound(employee.full_name(), date.to_string())),
    }
    Ok(())
}
