use std::process::ExitCode;
use timecard::commands::Cli;
use timecard::libs::messages::macros::is_debug_mode;
use timecard::msg_error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timecard=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            msg_error!(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
