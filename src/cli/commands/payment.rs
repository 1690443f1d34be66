use crate::booking::WizardStep;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgCompletion, CommandEntry};
use crate::cli::ui::summary;
use crate::errors::BookingError;
use crate::payment::{CardField, PaymentMethod};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "pay",
            "Choose how to pay",
            "pay <cash|visa|mastercard|amex>",
            cmd_pay,
        )
        .completing(ArgCompletion::PaymentMethods),
        CommandEntry::new(
            "card",
            "Fill in a card field",
            "card <holder|number|expiry|cvc> <value>",
            cmd_card,
        )
        .completing(ArgCompletion::CardFields),
        CommandEntry::new(
            "back",
            "Return to the payment method list",
            "back",
            cmd_back,
        ),
        CommandEntry::new(
            "submit",
            "Submit the details form or the card form",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new(
            "confirm",
            "Confirm a cash payment",
            "confirm",
            cmd_confirm,
        ),
        CommandEntry::new(
            "receipt",
            "Show the confirmed booking",
            "receipt [--json]",
            cmd_receipt,
        ),
    ]
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: pay <cash|visa|mastercard|amex>".into())
    })?;
    let method = PaymentMethod::parse(raw)
        .ok_or_else(|| BookingError::UnknownPaymentMethod(raw.to_string()))?;
    context.flow.choose_payment(method)?;
    summary::print_payment_screen(&context.flow);
    Ok(())
}

fn cmd_card(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: card <holder|number|expiry|cvc> <value>".into(),
        ));
    };
    let field = CardField::parse(field).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown card field `{field}` (expected holder, number, expiry or cvc)"
        ))
    })?;
    let card = context.flow.update_card(field, &rest.join(" "))?;
    let shown = match field {
        CardField::Number => format!("ending {}", card.last4()),
        CardField::Cvc => "***".to_string(),
        _ => card.value(field).to_string(),
    };
    io::print_info(format!("Card {}: {}", field.as_str(), shown));
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.payment_back()?;
    summary::print_payment_screen(&context.flow);
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.flow.step() {
        WizardStep::Route | WizardStep::Details => {
            context.flow.submit_details()?;
            summary::print_payment_screen(&context.flow);
            Ok(())
        }
        _ => {
            io::print_info("Processing payment...");
            let gateway = context.gateway();
            context.flow.submit_card(&gateway)?;
            show_confirmation(context);
            Ok(())
        }
    }
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let gateway = context.gateway();
    context.flow.confirm_cash(&gateway)?;
    show_confirmation(context);
    Ok(())
}

fn show_confirmation(context: &ShellContext) {
    if let Some(confirmed) = context.flow.confirmation() {
        io::print_success(format!("Booking {} confirmed.", confirmed.reference));
        summary::print_confirmation(confirmed, &context.flow.settings().currency);
    }
}

fn cmd_receipt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(confirmed) = context.flow.confirmation() else {
        return Err(CommandError::InvalidArguments(
            "no confirmed booking yet; finish payment first".into(),
        ));
    };
    if args.iter().any(|arg| *arg == "--json") {
        println!("{}", serde_json::to_string_pretty(confirmed)?);
    } else {
        summary::print_confirmation(confirmed, &context.flow.settings().currency);
    }
    Ok(())
}
