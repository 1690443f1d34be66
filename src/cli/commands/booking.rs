use chrono::{NaiveDate, NaiveTime};

use crate::booking::{parse_distance, BookingType, DraftUpdate, WizardStep};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{
    CardForm, DetailsForm, FormEngine, FormResult, WizardInteraction, DATE_FORMAT, TIME_FORMAT,
};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{ArgCompletion, CommandEntry};
use crate::cli::ui::prompts::{
    choice_menu, confirm_menu, ChoicePromptResult, ConfirmationPromptResult,
};
use crate::cli::ui::summary;
use crate::errors::BookingError;
use crate::payment::{PaymentMethod, PaymentState};

/// Field names accepted by `contact`.
pub(crate) const CONTACT_FIELDS: [&str; 4] = ["name", "email", "phone", "notes"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "book",
            "Guided booking: vehicle, details, payment",
            "book",
            cmd_book,
        ),
        CommandEntry::new(
            "select",
            "Choose a vehicle and start a booking",
            "select <id|number>",
            cmd_select,
        )
        .completing(ArgCompletion::Vehicles),
        CommandEntry::new(
            "route",
            "Set pickup, drop-off and distance",
            "route <pickup> <dropoff> <distance-km>",
            cmd_route,
        ),
        CommandEntry::new(
            "hourly",
            "Hire the chauffeur by the hour",
            "hourly <hours>",
            cmd_hourly,
        ),
        CommandEntry::new(
            "transfer",
            "Switch back to a point-to-point transfer",
            "transfer",
            cmd_transfer,
        ),
        CommandEntry::new(
            "schedule",
            "Set the pickup date and time",
            "schedule <YYYY-MM-DD> <HH:MM>",
            cmd_schedule,
        ),
        CommandEntry::new(
            "contact",
            "Set passenger contact details",
            "contact <name|email|phone|notes> <value>",
            cmd_contact,
        )
        .completing(ArgCompletion::ContactFields),
        CommandEntry::new(
            "next",
            "Move on to the next booking step",
            "next",
            cmd_next,
        ),
        CommandEntry::new(
            "status",
            "Show the booking in progress",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "restart",
            "Abandon the booking and start over",
            "restart",
            cmd_restart,
        ),
    ]
}

pub(crate) fn print_welcome(context: &ShellContext) {
    output_section("Luxury chauffeur booking");
    io::print_info(format!(
        "{} vehicles available. Type `vehicles` to browse, `book` for a guided booking or `help` for all commands.",
        context.flow.catalog().len()
    ));
}

fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = args.first().ok_or_else(|| usage("select <id|number>"))?;
    let draft = context.flow.select_vehicle(key)?;
    let name = draft
        .vehicle()
        .map(|vehicle| vehicle.name.clone())
        .unwrap_or_default();
    io::print_success(format!(
        "{} selected. Estimated fare {}.",
        name,
        context.flow.display_price()
    ));
    if context.flow.step() == WizardStep::Route {
        io::print_hint("Type `next` to enter your details.");
    }
    Ok(())
}

fn cmd_route(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [pickup, dropoff, distance] = args else {
        return Err(usage("route <pickup> <dropoff> <distance-km>"));
    };
    let km = parse_distance(distance);
    if km == 0.0 {
        io::print_warning(format!(
            "`{distance}` is not a usable distance; the fare stays at zero until it is set."
        ));
    }
    context
        .flow
        .update(DraftUpdate::Pickup(pickup.to_string()))?;
    context
        .flow
        .update(DraftUpdate::Dropoff(dropoff.to_string()))?;
    context.flow.update(DraftUpdate::Distance(km))?;
    io::print_info(format!(
        "Route set: {pickup} to {dropoff}, {km} km. Fare {}.",
        context.flow.display_price()
    ));
    Ok(())
}

fn cmd_hourly(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or_else(|| usage("hourly <hours>"))?;
    let hours = parse_distance(raw);
    if hours == 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "hours must be a positive number, got `{raw}`"
        )));
    }
    context
        .flow
        .update(DraftUpdate::BookingType(BookingType::Hourly { hours }))?;
    io::print_info(format!(
        "Hourly hire for {hours} h. Fare {}.",
        context.flow.display_price()
    ));
    Ok(())
}

fn cmd_transfer(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context
        .flow
        .update(DraftUpdate::BookingType(BookingType::Transfer))?;
    io::print_info(format!(
        "Point-to-point transfer. Fare {}.",
        context.flow.display_price()
    ));
    Ok(())
}

fn cmd_schedule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, time] = args else {
        return Err(usage("schedule <YYYY-MM-DD> <HH:MM>"));
    };
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{date}` is not a date in YYYY-MM-DD format"))
    })?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{time}` is not a 24-hour HH:MM time"))
    })?;
    context.flow.update(DraftUpdate::Date(Some(date)))?;
    context.flow.update(DraftUpdate::Time(Some(time)))?;
    io::print_info(format!(
        "Pickup on {} at {}.",
        date.format(DATE_FORMAT),
        time.format(TIME_FORMAT)
    ));
    Ok(())
}

fn cmd_contact(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(usage("contact <name|email|phone|notes> <value>"));
    };
    let value = rest.join(" ");
    let update = match field.to_ascii_lowercase().as_str() {
        "name" => DraftUpdate::Name(value),
        "email" => DraftUpdate::Email(value),
        "phone" => DraftUpdate::Phone(value),
        "notes" => DraftUpdate::Notes(value),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown contact field `{other}` (expected one of {})",
                CONTACT_FIELDS.join(", ")
            )))
        }
    };
    context.flow.update(update)?;
    io::print_info(format!("Updated {}.", field.to_ascii_lowercase()));
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.flow.step() {
        WizardStep::Route => {
            context.flow.continue_to_details()?;
            summary::print_steps(context.flow.wizard());
            io::print_info(
                "Enter your details with `contact` and `schedule`, then `next` to continue to payment.",
            );
        }
        WizardStep::Details => {
            context.flow.submit_details()?;
            summary::print_payment_screen(&context.flow);
        }
        WizardStep::Payment => summary::print_payment_screen(&context.flow),
        WizardStep::Confirmation => {
            io::print_info(
                "This booking is confirmed. Use `receipt` to see it or `restart` for a new one.",
            );
        }
    }
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let flow = &context.flow;
    output_section(format!("Booking: {}", flow.step().label()));
    summary::print_steps(flow.wizard());
    match flow.booking() {
        Some(draft) => summary::print_booking(draft, &flow.settings().currency),
        None => io::print_info("No booking in progress. Type `vehicles` to browse the fleet."),
    }
    if let Ok(outcome) = flow.validate() {
        let missing = outcome.missing_fields();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
            io::print_hint(format!("Still needed: {}.", labels.join(", ")));
        }
    }
    Ok(())
}

fn cmd_restart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.restart();
    io::print_info("Booking cleared. Choose a vehicle to start again.");
    Ok(())
}

fn cmd_book(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "`book` needs an interactive terminal; use `select`, `next` and `pay` in scripts".into(),
        ));
    }
    if context.flow.step() == WizardStep::Confirmation {
        context.flow.restart();
    }

    if matches!(
        context.flow.step(),
        WizardStep::Route | WizardStep::Details
    ) {
        if !choose_vehicle(context)? {
            io::print_info("Booking paused.");
            return Ok(());
        }
        if context.flow.step() == WizardStep::Route {
            context.flow.continue_to_details()?;
        }
        summary::print_steps(context.flow.wizard());
        if !fill_details(context)? {
            io::print_info("Booking paused. Type `book` to pick up where you left off.");
            return Ok(());
        }
    }

    run_payment(context)
}

fn choose_vehicle(context: &mut ShellContext) -> Result<bool, CommandError> {
    let flow = &context.flow;
    let currency = &flow.settings().currency;
    let options: Vec<String> = flow
        .catalog()
        .vehicles()
        .iter()
        .enumerate()
        .map(|(idx, vehicle)| summary::vehicle_line(idx + 1, vehicle, currency))
        .collect();
    let current = flow
        .draft()
        .and_then(|draft| draft.vehicle())
        .and_then(|selected| {
            flow.catalog()
                .vehicles()
                .iter()
                .position(|vehicle| vehicle.id == selected.id)
        });

    match choice_menu("Choose your vehicle", &options, current)? {
        ChoicePromptResult::Selected(index) => {
            let id = flow.catalog().vehicles()[index].id.clone();
            context.flow.select_vehicle(&id)?;
            io::print_success(format!(
                "Vehicle selected. Estimated fare {}.",
                context.flow.display_price()
            ));
            Ok(true)
        }
        ChoicePromptResult::Back | ChoicePromptResult::Cancel => Ok(false),
    }
}

fn fill_details(context: &mut ShellContext) -> Result<bool, CommandError> {
    loop {
        let form = {
            let draft = context.flow.draft().ok_or(BookingError::MissingContext)?;
            DetailsForm::new(context.flow.settings().variant, draft)
        };
        match FormEngine::new(&form).run(&mut WizardInteraction::new())? {
            FormResult::Completed(updates) => {
                for update in updates {
                    context.flow.update(update)?;
                }
            }
            FormResult::Cancelled => return Ok(false),
        }

        match context.flow.submit_details() {
            Ok(_) => return Ok(true),
            Err(err @ BookingError::MissingFields(_)) => io::print_error(err),
            Err(err) => return Err(err.into()),
        }
    }
}

fn run_payment(context: &mut ShellContext) -> CommandResult {
    let options: Vec<String> = PaymentMethod::ALL
        .iter()
        .map(|method| method.label().to_string())
        .collect();
    if !matches!(
        context.flow.payment_state(),
        PaymentState::Unselected { .. }
    ) {
        context.flow.payment_back()?;
    }

    loop {
        summary::print_payment_screen(&context.flow);
        let method = match choice_menu("Payment method", &options, None)? {
            ChoicePromptResult::Selected(index) => PaymentMethod::ALL[index],
            ChoicePromptResult::Back | ChoicePromptResult::Cancel => {
                io::print_info("Payment paused. Use `pay <method>` or `book` to continue.");
                return Ok(());
            }
        };
        context.flow.choose_payment(method)?;

        let settled = if method.requires_card() {
            pay_by_card(context)?
        } else {
            pay_in_cash(context)?
        };
        if settled {
            if let Some(confirmed) = context.flow.confirmation() {
                summary::print_confirmation(confirmed, &context.flow.settings().currency);
            }
            return Ok(());
        }
    }
}

/// Returns `false` when the user should pick a method again.
fn pay_by_card(context: &mut ShellContext) -> Result<bool, CommandError> {
    let form = CardForm::new();
    loop {
        let fields = match FormEngine::new(&form).run(&mut WizardInteraction::new())? {
            FormResult::Completed(fields) => fields,
            FormResult::Cancelled => {
                context.flow.payment_back()?;
                return Ok(false);
            }
        };
        for (field, value) in fields {
            context.flow.update_card(field, &value)?;
        }

        io::print_info("Processing payment...");
        let gateway = context.gateway();
        match context.flow.submit_card(&gateway) {
            Ok(_) => return Ok(true),
            Err(err @ BookingError::InvalidCard(_)) => io::print_error(err),
            Err(err @ BookingError::PaymentFailed(_)) => {
                io::print_error(err);
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn pay_in_cash(context: &mut ShellContext) -> Result<bool, CommandError> {
    let title = format!(
        "Pay {} in cash to your chauffeur?",
        context.flow.display_price()
    );
    match confirm_menu(&title)? {
        ConfirmationPromptResult::Confirm => {
            let gateway = context.gateway();
            match context.flow.confirm_cash(&gateway) {
                Ok(_) => Ok(true),
                Err(err @ BookingError::PaymentFailed(_)) => {
                    io::print_error(err);
                    Ok(false)
                }
                Err(err) => Err(err.into()),
            }
        }
        ConfirmationPromptResult::Back | ConfirmationPromptResult::Cancel => {
            context.flow.payment_back()?;
            Ok(false)
        }
    }
}
