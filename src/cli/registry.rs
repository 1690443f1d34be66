//! Command table for the booking shell.

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What the arguments of a command complete to in the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgCompletion {
    #[default]
    Nothing,
    Vehicles,
    PaymentMethods,
    CardFields,
    ContactFields,
    Commands,
    /// `show|set|reset`, then keys after `set`, then fixed values for a key.
    Config,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub completion: ArgCompletion,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        summary: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            summary,
            usage,
            handler,
            completion: ArgCompletion::Nothing,
        }
    }

    pub fn completing(self, completion: ArgCompletion) -> Self {
        Self { completion, ..self }
    }
}

/// Shell commands in the order `help` lists them.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Ranks entries by their position in `order`; unranked names go last.
    pub fn ordered(mut entries: Vec<CommandEntry>, order: &[&str]) -> Self {
        entries.sort_by_key(|entry| {
            order
                .iter()
                .position(|name| entry.name.eq_ignore_ascii_case(name))
                .unwrap_or(order.len())
        });
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}
