use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{ArgCompletion, CommandEntry};
use crate::cli::ui::formatting::Formatter;
use crate::config::{Config, CONFIG_KEYS};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change application preferences",
        "config [show|set <key> <value>|reset]",
        cmd_config,
    )
    .completing(ArgCompletion::Config)]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.config.set(key, &value)?;
            context.save_config()?;
            io::print_success(format!("{} updated.", key.to_ascii_lowercase()));
            Ok(())
        }
        "reset" => {
            context.config = Config::default();
            context.save_config()?;
            io::print_success("Preferences restored to defaults.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; usage: config [show|set <key> <value>|reset]"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output_section("Configuration");
    Formatter::new().print_two_column(&[
        ("currency", config.currency.clone()),
        ("flow", config.flow_variant.as_str().to_string()),
        ("pickup", config.demo_route.pickup.clone()),
        ("dropoff", config.demo_route.dropoff.clone()),
        ("distance", config.demo_route.distance_km.to_string()),
        ("payment-delay-ms", config.payment_delay_ms.to_string()),
        ("payment-outcome", config.payment_outcome.as_str().to_string()),
        ("plain-output", on_off(config.plain_output)),
    ]);
    io::print_info(format!(
        "Stored in {}",
        context.config_manager.path().display()
    ));
}

fn on_off(flag: bool) -> String {
    let label = if flag { "on" } else { "off" };
    label.to_string()
}
