//! Text for every [`Message`] variant.
//!
//! Keeping the wording in one match makes it easy to review tone and
//! spot duplicates; parameters are interpolated here and nowhere else.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleTracker => "Attendance rules".to_string(),

            // === EMPLOYEE MESSAGES ===
            Message::EmployeeCreated(id, name) => format!("Employee {} added with id {}", name, id),
            Message::EmployeeUpdated(name) => format!("Employee {} updated", name),
            Message::EmployeeDeleted(name) => format!("Employee {} deleted. Attendance history is kept", name),
            Message::EmployeeNotFound(id) => format!("Employee with id {} not found", id),
            Message::EmployeesHeader => "Employees".to_string(),
            Message::EditingEmployee(name) => format!("Editing {}. Press enter to keep a value", name),
            Message::EmployeesNotFound => "No employees yet. Add one with `employee add`".to_string(),
            Message::ConfirmDeleteEmployee(name) => format!("Delete employee {}?", name),
            Message::NoChangesDetected => "No changes detected".to_string(),

            // === ATTENDANCE MESSAGES ===
            Message::ClockedIn(name, time) => format!("{} clocked in at {}", name, time),
            Message::BreakStarted(name, time) => format!("{} started a break at {}", name, time),
            Message::BreakEnded(name, time, length) => format!("{} ended a break at {} ({})", name, time, length),
            Message::ClockedOut(name, time, net) => format!("{} clocked out at {}. Net work: {}", name, time, net),
            Message::ClockSkewClamped(details) => format!("Event time adjusted: {}", details),
            Message::AttendanceHeader(date) => format!("Attendance for {}", date),
            Message::AttendanceStatusHeader(name, date) => format!("{} on {}", name, date),
            Message::AttendanceNotFound(name, date) => format!("{} has not clocked in on {}", name, date),
            Message::NoAttendanceForDate(date) => format!("Nobody clocked in on {}", date),

            // === DATABASE MESSAGES ===
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),

            // === INPUT MESSAGES ===
            Message::InvalidDate(input) => format!("Invalid date '{}'. Use YYYY-MM-DD or 'today'", input),
            Message::InvalidTime(input) => format!("Invalid time '{}'. Use HH:MM or HH:MM:SS", input),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === PROMPT MESSAGES ===
            Message::PromptFirstName => "First name".to_string(),
            Message::PromptLastName => "Last name".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptAvatar => "Avatar URL (optional)".to_string(),
            Message::PromptDepartment => "Department".to_string(),
            Message::PromptRole => "Role".to_string(),
            Message::PromptSkewPolicy => "When an event time is earlier than the last recorded event".to_string(),
            Message::PromptBreakAtClockOut => "When an employee clocks out during a break".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
        };
        write!(f, "{}", s)
    }
}
