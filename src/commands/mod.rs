//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` function. The attendance commands stand in for the dashboard
//! buttons: `in`, `break start`, `break end` and `out`.

pub mod attendance;
pub mod clock;
pub mod employee;
pub mod init;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure attendance rules and the database location")]
    Init(init::InitArgs),
    #[command(about = "Manage employees", arg_required_else_help = true)]
    Employee(employee::EmployeeArgs),
    #[command(about = "Clock an employee in")]
    In(clock::ClockArgs),
    #[command(about = "Clock an employee out")]
    Out(clock::ClockArgs),
    #[command(about = "Start or end a break", arg_required_else_help = true)]
    Break(clock::BreakArgs),
    #[command(about = "Show one employee's attendance for a day")]
    Status(status::StatusArgs),
    #[command(about = "Show the attendance sheet for a day")]
    Attendance(attendance::AttendanceArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations", arg_required_else_help = true)]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Employee(args) => employee::cmd(args),
            Commands::In(args) => clock::clock_in(args),
            Commands::Out(args) => clock::clock_out(args),
            Commands::Break(args) => clock::breaks(args),
            Commands::Status(args) => status::cmd(args),
            Commands::Attendance(args) => attendance::cmd(args),
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
