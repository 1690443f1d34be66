//! Terminal front end: a booking shell with scripted and interactive input.

pub mod commands;
mod completion;
pub mod core;
pub mod forms;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod ui;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_MODE_ENV};
