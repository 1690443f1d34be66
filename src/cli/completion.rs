//! Line-editor helper: completes command names and booking arguments.

use std::borrow::Cow;

use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Helper,
};

use crate::cli::commands::booking::CONTACT_FIELDS;
use crate::cli::core::ShellContext;
use crate::cli::registry::ArgCompletion;
use crate::config::{value_choices, CONFIG_KEYS};
use crate::payment::{CardField, PaymentMethod};

const CONFIG_ACTIONS: [&str; 3] = ["show", "set", "reset"];

pub(crate) struct CommandHelper {
    commands: Vec<(&'static str, ArgCompletion)>,
    vehicles: Vec<String>,
}

impl CommandHelper {
    pub(crate) fn for_context(context: &ShellContext) -> Self {
        Self {
            commands: context
                .registry
                .entries()
                .iter()
                .map(|entry| (entry.name, entry.completion))
                .collect(),
            vehicles: context
                .flow
                .catalog()
                .vehicles()
                .iter()
                .map(|vehicle| vehicle.id.clone())
                .collect(),
        }
    }

    /// Start offset of the word under the cursor and the values that extend it.
    pub(crate) fn candidates(&self, before_cursor: &str) -> (usize, Vec<String>) {
        let start = before_cursor
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = before_cursor[start..].to_ascii_lowercase();
        let words: Vec<String> = before_cursor[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();

        let pool = match words.split_first() {
            None => self.commands.iter().map(|(name, _)| name.to_string()).collect(),
            Some((command, args)) => self.argument_pool(command, args),
        };
        let mut matches: Vec<String> = pool
            .into_iter()
            .filter(|value| value.starts_with(&needle))
            .collect();
        matches.sort();
        matches.dedup();
        (start, matches)
    }

    fn argument_pool(&self, command: &str, args: &[String]) -> Vec<String> {
        let completion = self
            .commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, completion)| *completion)
            .unwrap_or_default();

        match (completion, args) {
            (ArgCompletion::Vehicles, []) => self.vehicles.clone(),
            (ArgCompletion::PaymentMethods, []) => PaymentMethod::ALL
                .iter()
                .map(|method| method.as_str().to_string())
                .collect(),
            (ArgCompletion::CardFields, []) => CardField::ALL
                .iter()
                .map(|field| field.as_str().to_string())
                .collect(),
            (ArgCompletion::ContactFields, []) => owned(&CONTACT_FIELDS),
            (ArgCompletion::Commands, []) => self
                .commands
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            (ArgCompletion::Config, []) => owned(&CONFIG_ACTIONS),
            (ArgCompletion::Config, [action]) if action == "set" => owned(CONFIG_KEYS),
            (ArgCompletion::Config, [action, key]) if action == "set" => {
                owned(value_choices(key))
            }
            _ => Vec::new(),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, values) = self.candidates(&line[..pos]);
        let pairs = values
            .into_iter()
            .map(|value| Pair {
                display: value.clone(),
                replacement: value,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::CliMode;
    use crate::config::ConfigManager;
    use tempfile::TempDir;

    fn helper() -> (TempDir, CommandHelper) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        let helper = CommandHelper::for_context(&context);
        (temp, helper)
    }

    fn values(helper: &CommandHelper, line: &str) -> Vec<String> {
        helper.candidates(line).1
    }

    #[test]
    fn command_words_complete_from_the_registry() {
        let (_temp, helper) = helper();
        assert_eq!(helper.candidates("re"), (0, vec!["receipt".into(), "restart".into()]));
        assert!(values(&helper, "").contains(&"book".to_string()));
    }

    #[test]
    fn vehicle_ids_follow_select_and_vehicles() {
        let (_temp, helper) = helper();
        assert_eq!(helper.candidates("select bmw"), (7, vec!["bmw-7".into()]));
        assert_eq!(values(&helper, "vehicles mer"), ["mercedes-s-class", "mercedes-v"]);
        assert!(values(&helper, "select bmw-7 ").is_empty());
    }

    #[test]
    fn payment_arguments_complete() {
        let (_temp, helper) = helper();
        assert_eq!(values(&helper, "pay "), ["amex", "cash", "mastercard", "visa"]);
        assert_eq!(values(&helper, "PAY Ma"), ["mastercard"]);
        assert_eq!(values(&helper, "card "), ["cvc", "expiry", "holder", "number"]);
        assert!(values(&helper, "card number 4242").is_empty());
    }

    #[test]
    fn contact_and_help_arguments_complete() {
        let (_temp, helper) = helper();
        assert_eq!(values(&helper, "contact e"), ["email"]);
        assert_eq!(values(&helper, "help con"), ["config", "confirm", "contact"]);
        assert!(values(&helper, "next ").is_empty());
    }

    #[test]
    fn config_walks_action_key_and_value() {
        let (_temp, helper) = helper();
        assert_eq!(values(&helper, "config "), ["reset", "set", "show"]);
        assert_eq!(values(&helper, "config set pay"), ["payment-delay-ms", "payment-outcome"]);
        assert_eq!(
            values(&helper, "config set payment-outcome "),
            ["approve", "decline", "timeout"]
        );
        assert_eq!(values(&helper, "config set flow f"), ["fixed-route"]);
        assert!(values(&helper, "config set currency ").is_empty());
        assert!(values(&helper, "config show ").is_empty());
    }
}
