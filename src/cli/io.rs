use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;
use crate::cli::output::{self, OutputPreferences};
use crate::config::Config;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Pushes output-related configuration into the shared preferences.
pub fn apply_config(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
    });
    if config.plain_output {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(prompt: &str) -> Result<bool, CommandError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(CommandError::from)
}
