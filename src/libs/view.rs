use super::attendance::{AttendanceRecord, AttendanceStatus};
use super::employee::Employee;
use super::formatter::{format_duration, format_optional_duration, format_time};
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn employees(employees: &[Employee]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "DEPARTMENT", "ROLE"]);
        for employee in employees {
            table.add_row(row![
                employee.id,
                employee.full_name(),
                employee.email,
                employee.department,
                employee.role
            ]);
        }
        table.printstd();
    }

    pub fn employee(employee: &Employee) {
        let mut table = Table::new();

        table.add_row(row!["ID", employee.id]);
        table.add_row(row!["NAME", employee.full_name()]);
        table.add_row(row!["EMAIL", employee.email]);
        table.add_row(row!["AVATAR", employee.avatar.as_deref().unwrap_or("-")]);
        table.add_row(row!["DEPARTMENT", employee.department]);
        table.add_row(row!["ROLE", employee.role]);
        table.printstd();
    }

    /// Daily sheet: one row per employee, live totals for days still in progress.
    pub fn attendance(rows: &[(Employee, Option<AttendanceRecord>)], now: NaiveDateTime) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "STATUS", "CLOCK IN", "CLOCK OUT", "BREAK", "WORK"]);
        for (employee, record) in rows {
            match record {
                Some(record) => table.add_row(row![
                    employee.id,
                    employee.full_name(),
                    employee.email,
                    status_label(record.status()),
                    format_time(record.clock_in()),
                    format_time(record.clock_out()),
                    format_duration(&record.break_duration_at(now)),
                    format_duration(&record.net_work_at(now))
                ]),
                None => table.add_row(row![
                    employee.id,
                    employee.full_name(),
                    employee.email,
                    status_label(AttendanceStatus::NotPresent),
                    "-",
                    "-",
                    "-",
                    "-"
                ]),
            };
        }
        table.printstd();
    }

    /// One employee's day, break by break.
    pub fn record(record: &AttendanceRecord, now: NaiveDateTime) {
        let mut table = Table::new();

        table.add_row(row!["STATUS", status_label(record.status())]);
        table.add_row(row!["CLOCK IN", format_time(record.clock_in())]);
        for (i, event) in record.break_events().iter().enumerate() {
            let span = format!("{} - {}", format_time(Some(event.start)), format_time(event.end));
            table.add_row(row![format!("BREAK {}", i + 1), span]);
        }
        table.add_row(row!["CLOCK OUT", format_time(record.clock_out())]);
        table.add_row(row!["BREAK TOTAL", format_duration(&record.break_duration_at(now))]);
        table.add_row(row!["WORK", format_optional_duration(record.total_work_duration())]);
        table.add_row(row!["NET WORK", format_duration(&record.net_work_at(now))]);
        if record.had_skew() {
            table.add_row(row!["NOTE", "event times were adjusted"]);
        }
        table.printstd();
    }
}

/// Label shown in tables, kept apart from the wire names used in JSON.
pub fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::NotPresent => "Not present",
        AttendanceStatus::Active => "Active",
        AttendanceStatus::OnBreak => "On Break",
        AttendanceStatus::DayOver => "Finished",
    }
}
