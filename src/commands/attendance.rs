//! Daily attendance sheet for every employee in the directory.

use super::clock::parse_date;
use crate::db::employees::Employees;
use crate::libs::messages::Message;
use crate::libs::timeclock::TimeClock;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[arg(long, short, default_value = "today", help = "Date to show (YYYY-MM-DD or 'today')")]
    date: String,
}

pub fn cmd(args: AttendanceArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let now = Local::now().naive_local();

    let employees = Employees::new()?.list()?;
    let mut records = TimeClock::open()?.day(date)?;
    if records.is_empty() {
        msg_info!(Message::NoAttendanceForDate(date.to_string()));
    }

    let rows: Vec<_> = employees
        .into_iter()
        .map(|employee| {
            let record = records
                .iter()
                .position(|r| r.employee_id() == employee.id)
                .map(|i| records.swap_remove(i));
            (employee, record)
        })
        .collect();

    msg_print!(Message::AttendanceHeader(date.format("%B %-d, %Y").to_string()), true);
    View::attendance(&rows, now);
    Ok(())
}
