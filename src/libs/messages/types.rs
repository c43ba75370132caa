/// Every user-facing message the application prints.
///
/// Text lives in [`super::display`]; call sites only pick a variant and
/// supply its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleTracker,

    // === EMPLOYEE MESSAGES ===
    EmployeeCreated(i64, String), // id, full name
    EmployeeUpdated(String),
    EmployeeDeleted(String),
    EmployeeNotFound(i64),
    EmployeesHeader,
    EditingEmployee(String),
    EmployeesNotFound,
    ConfirmDeleteEmployee(String),
    NoChangesDetected,

    // === ATTENDANCE MESSAGES ===
    ClockedIn(String, String),            // name, time
    BreakStarted(String, String),         // name, time
    BreakEnded(String, String, String),   // name, time, break length
    ClockedOut(String, String, String),   // name, time, net work
    ClockSkewClamped(String),             // skew details
    AttendanceHeader(String),             // date
    AttendanceStatusHeader(String, String), // name, date
    AttendanceNotFound(String, String),   // name, date
    NoAttendanceForDate(String),

    // === DATABASE MESSAGES ===
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === INPUT MESSAGES ===
    InvalidDate(String),
    InvalidTime(String),
    OperationCancelled,

    // === PROMPT MESSAGES ===
    PromptFirstName,
    PromptLastName,
    PromptEmail,
    PromptAvatar,
    PromptDepartment,
    PromptRole,
    PromptSkewPolicy,
    PromptBreakAtClockOut,
    PromptDatabasePath,
}
