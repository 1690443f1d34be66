use crate::booking::WizardStep;
use crate::catalog::CATALOG_VERSION;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{ArgCompletion, CommandEntry};
use crate::cli::ui::formatting::Formatter;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "List commands, or explain one",
            "help [command]",
            cmd_help,
        )
        .completing(ArgCompletion::Commands),
        CommandEntry::new(
            "version",
            "Show build and fleet catalog versions",
            "version",
            cmd_version,
        ),
        CommandEntry::new("exit", "Leave the booking shell", "exit", cmd_exit),
    ]
}

/// Commands that move the booking forward from where it stands.
fn next_commands(step: WizardStep, has_draft: bool) -> &'static [&'static str] {
    match step {
        WizardStep::Route if !has_draft => &["vehicles", "select", "book"],
        WizardStep::Route => &["route", "hourly", "next"],
        WizardStep::Details => &["contact", "schedule", "next"],
        WizardStep::Payment => &["pay", "card", "submit", "confirm"],
        WizardStep::Confirmation => &["receipt", "restart"],
    }
}

fn completion_note(completion: ArgCompletion) -> Option<&'static str> {
    match completion {
        ArgCompletion::Nothing => None,
        ArgCompletion::Vehicles => Some("vehicle ids"),
        ArgCompletion::PaymentMethods => Some("payment methods"),
        ArgCompletion::CardFields => Some("card fields"),
        ArgCompletion::ContactFields => Some("contact fields"),
        ArgCompletion::Commands => Some("command names"),
        ArgCompletion::Config => Some("actions, keys and fixed values"),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        print_overview(context);
        return Ok(());
    };
    match context.command(name) {
        Some(entry) => print_command(entry),
        None => context.suggest_command(name),
    }
    Ok(())
}

fn print_overview(context: &ShellContext) {
    output_section("Available commands");
    let rows: Vec<(&str, String)> = context
        .registry
        .entries()
        .iter()
        .map(|entry| (entry.name, entry.summary.to_string()))
        .collect();
    Formatter::new().print_two_column(&rows);

    let flow = &context.flow;
    let next = next_commands(flow.step(), flow.draft().is_some());
    io::print_info(format!(
        "Next at this step: {}",
        next.iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    io::print_hint("Use `help <command>` for usage. Press Tab or `?` to complete arguments.");
}

fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    println!("  {}", entry.summary);
    println!("  Usage: {}", entry.usage);
    if let Some(note) = completion_note(entry.completion) {
        println!("  Tab completes {note}.");
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Chauffeur Core {}", meta.version));
    Formatter::new().print_two_column(&[
        ("Fleet catalog", format!("v{CATALOG_VERSION}")),
        ("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.flow.draft().is_some() && context.flow.confirmation().is_none() {
        io::print_warning("Leaving with an unconfirmed booking; it is not kept.");
    }
    io::print_info("Goodbye.");
    Err(CommandError::ExitRequested)
}
