//! User-facing messages and the macros that print them.
//!
//! In normal runs messages go straight to the terminal. With
//! `TIMECARD_DEBUG` or `RUST_LOG` set they are routed through `tracing`
//! instead, so they interleave with the structured log output.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
