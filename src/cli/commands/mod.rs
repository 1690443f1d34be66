pub mod booking;
pub mod catalog;
pub mod config;
pub mod payment;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "book",
    "vehicles",
    "select",
    "route",
    "hourly",
    "transfer",
    "schedule",
    "contact",
    "next",
    "status",
    "pay",
    "card",
    "back",
    "submit",
    "confirm",
    "receipt",
    "restart",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(catalog::definitions());
    commands.extend(booking::definitions());
    commands.extend(payment::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

/// Every shell command, ordered along the booking journey.
pub(crate) fn registry() -> CommandRegistry {
    CommandRegistry::ordered(all_entries(), ROOT_COMMAND_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry::ArgCompletion;

    #[test]
    fn every_command_has_a_place_in_the_order() {
        let registry = registry();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }

    #[test]
    fn argument_commands_declare_their_completion() {
        let registry = registry();
        let completion = |name: &str| registry.get(name).map(|entry| entry.completion);
        assert_eq!(completion("select"), Some(ArgCompletion::Vehicles));
        assert_eq!(completion("vehicles"), Some(ArgCompletion::Vehicles));
        assert_eq!(completion("pay"), Some(ArgCompletion::PaymentMethods));
        assert_eq!(completion("card"), Some(ArgCompletion::CardFields));
        assert_eq!(completion("contact"), Some(ArgCompletion::ContactFields));
        assert_eq!(completion("config"), Some(ArgCompletion::Config));
        assert_eq!(completion("help"), Some(ArgCompletion::Commands));
        assert_eq!(completion("next"), Some(ArgCompletion::Nothing));
    }
}
