use std::io::{self, BufRead, Lines, StdinLock};

use rustyline::{error::ReadlineError, history::DefaultHistory, Cmd, Editor, KeyEvent};

use crate::cli::commands::booking::print_welcome;
use crate::cli::completion::CommandHelper;
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

pub const SCRIPT_MODE_ENV: &str = "CHAUFFEUR_CLI_SCRIPT";

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Where booking commands come from: the line editor or piped stdin.
trait LineSource {
    fn read(&mut self, prompt: &str) -> Result<Input, CliError>;
}

struct Terminal {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl Terminal {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::for_context(context)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed).ok();
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

struct Script {
    lines: Lines<StdinLock<'static>>,
}

impl LineSource for Script {
    fn read(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => {
            let mut terminal = Terminal::new(&context)?;
            print_welcome(&context);
            drive(&mut context, &mut terminal)
        }
        CliMode::Script => {
            let mut script = Script {
                lines: io::stdin().lock().lines(),
            };
            drive(&mut context, &mut script)
        }
    }
}

fn drive(context: &mut ShellContext, source: &mut impl LineSource) -> Result<(), CliError> {
    while context.running {
        match source.read(&context.prompt())? {
            Input::Line(line) => match context.run_line(&line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Input::Closed => {
                if context.mode == CliMode::Interactive {
                    output_info("Goodbye.");
                }
                break;
            }
        }
    }
    Ok(())
}
