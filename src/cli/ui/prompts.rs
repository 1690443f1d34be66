use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::ui::test_mode::{self, TextTestInput};

/// Re-derives the displayed value from everything typed so far.
pub type InputMask = fn(&str) -> String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Help,
    Escape,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoicePromptResult {
    Selected(usize),
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPromptResult {
    Confirm,
    Back,
    Cancel,
}

const CONFIRM_OPTIONS: [&str; 3] = ["Confirm", "Edit previous field", "Cancel"];

pub fn text_input(
    label: &str,
    default: Option<&str>,
    mask: Option<InputMask>,
) -> io::Result<TextPromptResult> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => TextPromptResult::Value(apply_mask(mask, &value)),
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Back => TextPromptResult::Back,
            TextTestInput::Help => TextPromptResult::Help,
            TextTestInput::Escape => TextPromptResult::Escape,
            TextTestInput::Cancel => TextPromptResult::Cancel,
        });
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    redraw_input(&mut stdout, "")?;
    let mut buffer = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(TextPromptResult::Cancel);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, &buffer)?;
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(TextPromptResult::Escape);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(interpret_buffer(&buffer, default));
            }
            KeyCode::Backspace => {
                buffer.pop();
                buffer = apply_mask(mask, &buffer);
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                if !buffer.starts_with(':') {
                    buffer = apply_mask(mask, &buffer);
                }
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Delete => {
                buffer.clear();
                redraw_input(&mut stdout, &buffer)?;
            }
            _ => {}
        }
    }
}

fn apply_mask(mask: Option<InputMask>, raw: &str) -> String {
    match mask {
        Some(mask) => mask(raw),
        None => raw.to_string(),
    }
}

/// Picks one option. Scripted answers may give the 1-based position or the label.
pub fn choice_menu(
    title: &str,
    options: &[String],
    default: Option<usize>,
) -> io::Result<ChoicePromptResult> {
    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }

    if let Some(scripted) = test_mode::next_text_input(title) {
        return Ok(match scripted {
            TextTestInput::Value(value) => match resolve_choice(options, &value) {
                Some(index) => ChoicePromptResult::Selected(index),
                None => ChoicePromptResult::Cancel,
            },
            TextTestInput::Keep => default
                .map(ChoicePromptResult::Selected)
                .unwrap_or(ChoicePromptResult::Cancel),
            TextTestInput::Back => ChoicePromptResult::Back,
            _ => ChoicePromptResult::Cancel,
        });
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(title)
        .items(options)
        .default(default.unwrap_or(0).min(options.len() - 1))
        .interact_opt()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    Ok(match selection {
        Some(index) => ChoicePromptResult::Selected(index),
        None => ChoicePromptResult::Cancel,
    })
}

pub fn confirm_menu(title: &str) -> io::Result<ConfirmationPromptResult> {
    let options: Vec<String> = CONFIRM_OPTIONS.iter().map(|label| label.to_string()).collect();
    if let Some(scripted) = test_mode::next_text_input(title) {
        return Ok(match scripted {
            TextTestInput::Value(value)
                if matches!(value.trim().to_ascii_lowercase().as_str(), "y" | "yes") =>
            {
                ConfirmationPromptResult::Confirm
            }
            TextTestInput::Value(value) => match resolve_choice(&options, &value) {
                Some(0) => ConfirmationPromptResult::Confirm,
                Some(1) => ConfirmationPromptResult::Back,
                _ => ConfirmationPromptResult::Cancel,
            },
            TextTestInput::Back => ConfirmationPromptResult::Back,
            _ => ConfirmationPromptResult::Cancel,
        });
    }

    Ok(match choice_menu(title, &options, Some(0))? {
        ChoicePromptResult::Selected(0) => ConfirmationPromptResult::Confirm,
        ChoicePromptResult::Selected(1) | ChoicePromptResult::Back => {
            ConfirmationPromptResult::Back
        }
        _ => ConfirmationPromptResult::Cancel,
    })
}

fn resolve_choice(options: &[String], raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if let Ok(position) = trimmed.parse::<usize>() {
        return (1..=options.len()).contains(&position).then(|| position - 1);
    }
    options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(trimmed))
}

fn redraw_input(stdout: &mut Stdout, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some() {
            TextPromptResult::Keep
        } else {
            TextPromptResult::Value(String::new())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":help" => TextPromptResult::Help,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
