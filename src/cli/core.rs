//! Core CLI dispatch, error types and shell context helpers.

use std::io;

use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    errors::BookingError,
    flow::{BookingFlow, FlowSettings},
    payment::SimulatedGateway,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
use super::ui::banner::Banner;
use super::ui::test_mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a shell command can reach: settings, the booking in progress and
/// the command table.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub flow: BookingFlow,
    pub last_command: Option<String>,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let registry = commands::registry();
        let config = config_manager.load()?;
        cli_io::apply_config(&config);
        let flow = BookingFlow::from_config(&config);

        Ok(ShellContext {
            mode,
            registry,
            config_manager,
            config,
            flow,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        Banner::text(self)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Prompts are available on a terminal, or when scripted answers exist.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive || test_mode::is_enabled()
    }

    pub(crate) fn gateway(&self) -> SimulatedGateway {
        self.config.gateway()
    }

    /// Persists the configuration and pushes it into output and flow settings.
    pub(crate) fn save_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        cli_io::apply_config(&self.config);
        self.flow
            .set_settings(FlowSettings::from_config(&self.config));
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|entry| entry.handler) {
            tracing::debug!(command, context = %self.status(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Splits one input line into words and runs it. `#` lines are comments.
    pub(crate) fn run_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        if raw.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        self.last_command = Some(line.trim().to_string());
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, screen: {} }}",
            self.running,
            self.last_command,
            self.flow.screen().as_str()
        )
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Booking(err @ BookingError::MissingContext) => {
                self.print_error(&err.to_string());
                self.print_hint("Type `vehicles` to see the fleet, then `select <id>`.");
            }
            CommandError::Booking(err @ BookingError::MissingFields(_)) => {
                self.print_error(&err.to_string());
                self.print_hint("Fill them in with `contact`, `schedule` or `route`.");
            }
            CommandError::Booking(err @ BookingError::PaymentFailed(_)) => {
                self.print_error(&err.to_string());
                self.print_hint("Choose a payment method again with `pay <method>`.");
            }
            other => self.print_error(&other.to_string()),
        }
        Ok(())
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

fn split_line(line: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(line)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Booking(inner) => CliError::Booking(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        match app.run_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::WizardStep;
    use crate::payment::PaymentMethod;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> ConfigManager {
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = manager.load().unwrap();
        config.payment_delay_ms = 0;
        manager.save(&config).unwrap();
        manager
    }

    #[test]
    fn parse_line_handles_quotes() {
        let tokens = split_line("route \"Dubai Marina\" 'Palm Jumeirah' 12").unwrap();
        assert_eq!(tokens, vec!["route", "Dubai Marina", "Palm Jumeirah", "12"]);
        assert!(split_line("contact name \"Huda").is_err());
    }

    #[test]
    fn comments_and_bad_quoting_are_skipped() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            manager(&temp),
            &["# choose the sedan", "select \"bmw-7", "select bmw-7"],
        )
        .unwrap();
        assert_eq!(app.last_command.as_deref(), Some("select bmw-7"));
        assert!(app.flow.draft().is_some());
    }

    #[test]
    fn script_books_a_cash_ride() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            manager(&temp),
            &[
                "select mercedes-s-class",
                "next",
                "contact name \"Huda Ali\"",
                "contact email huda@example.com",
                "contact phone \"+971 50 765 4321\"",
                "schedule 2026-11-20 18:45",
                "next",
                "pay cash",
                "confirm",
            ],
        )
        .unwrap();

        assert_eq!(app.flow.step(), WizardStep::Confirmation);
        let confirmed = app.flow.confirmation().unwrap();
        assert_eq!(confirmed.payment_method(), Some(PaymentMethod::Cash));
        assert_eq!(confirmed.booking.price(), Some(125.0));
    }

    #[test]
    fn errors_do_not_stop_the_script() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            manager(&temp),
            &["pay visa", "select nope", "selct 1", "select 2"],
        )
        .unwrap();
        assert_eq!(
            app.flow.draft().and_then(|draft| draft.vehicle()).map(|v| v.id.as_str()),
            Some("bmw-7")
        );
    }

    #[test]
    fn exit_stops_processing() {
        let temp = TempDir::new().unwrap();
        let app = process_script(manager(&temp), &["exit", "select 1"]).unwrap();
        assert!(app.flow.draft().is_none());
        assert!(!app.running);
    }
}
