//! Read-only views of the booking: fleet, draft summary, payment screen and
//! confirmation receipt.

use crate::booking::{compute_price, BookingDraft, BookingType, StepWizard};
use crate::catalog::{Catalog, Vehicle};
use crate::cli::io;
use crate::cli::output::current_preferences;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::steps::render_steps;
use crate::currency::{format_price, CurrencyCode};
use crate::flow::{BookingFlow, ConfirmedBooking};
use crate::payment::{CardField, PaymentMethod, PaymentState};

pub fn print_steps(wizard: &StepWizard) {
    println!("{}", render_steps(wizard, &current_preferences()));
}

pub fn vehicle_line(position: usize, vehicle: &Vehicle, currency: &CurrencyCode) -> String {
    format!(
        "{}. {} [{}] {}, up to {} passengers, {}/km, {}/hour",
        position,
        vehicle.name,
        vehicle.id,
        vehicle.category.label(),
        vehicle.capacity,
        format_price(Some(vehicle.price_per_km), currency),
        format_price(Some(vehicle.price_per_hour), currency),
    )
}

pub fn print_fleet(catalog: &Catalog, selected: Option<&str>, currency: &CurrencyCode) {
    let formatter = Formatter::new();
    formatter.print_header("Our fleet");
    for (idx, vehicle) in catalog.vehicles().iter().enumerate() {
        let line = vehicle_line(idx + 1, vehicle, currency);
        if selected == Some(vehicle.id.as_str()) {
            println!("* {}", formatter.emphasis(line));
        } else {
            println!("  {line}");
        }
    }
}

pub fn print_vehicle(vehicle: &Vehicle, distance_km: f64, currency: &CurrencyCode) {
    let formatter = Formatter::new();
    formatter.print_header(&vehicle.name);
    formatter.print_two_column(&[
        ("Id", vehicle.id.clone()),
        ("Category", vehicle.category.label().to_string()),
        ("Passengers", vehicle.capacity.to_string()),
        (
            "Per km",
            format_price(Some(vehicle.price_per_km), currency),
        ),
        (
            "Per hour",
            format_price(Some(vehicle.price_per_hour), currency),
        ),
        (
            "Estimate",
            format!(
                "{} for {} km",
                format_price(Some(compute_price(distance_km, vehicle)), currency),
                distance_km
            ),
        ),
    ]);
    println!("  Features:");
    for feature in &vehicle.features {
        println!("    - {feature}");
    }
    formatter.print_detail(format!("  Photo: {}", vehicle.image_url));
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn booking_rows(draft: &BookingDraft, currency: &CurrencyCode) -> Vec<(&'static str, String)> {
    let route = draft.route();
    let contact = draft.contact();
    let mut rows = vec![
        (
            "Vehicle",
            draft
                .vehicle()
                .map(|vehicle| format!("{} ({})", vehicle.name, vehicle.category.label()))
                .unwrap_or_else(|| "not selected".into()),
        ),
        (
            "Trip",
            match draft.booking_type() {
                BookingType::Transfer => "Transfer".to_string(),
                BookingType::Hourly { hours } => format!("Hourly, {hours} h"),
            },
        ),
        (
            "Route",
            format!(
                "{} to {} ({} km)",
                or_dash(&route.pickup),
                or_dash(&route.dropoff),
                route.distance_km
            ),
        ),
        (
            "Date",
            draft
                .date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into()),
        ),
        (
            "Time",
            draft
                .time()
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
        ),
        ("Name", or_dash(&contact.name)),
        ("Email", or_dash(&contact.email)),
        ("Phone", or_dash(&contact.phone)),
    ];
    if let Some(notes) = &contact.notes {
        rows.push(("Notes", notes.clone()));
    }
    if let Some(method) = draft.payment_method() {
        rows.push(("Payment", method.label().to_string()));
    }
    rows.push(("Total", format_price(draft.price(), currency)));
    rows
}

pub fn print_booking(draft: &BookingDraft, currency: &CurrencyCode) {
    Formatter::new().print_two_column(&booking_rows(draft, currency));
}

pub fn print_payment_screen(flow: &BookingFlow) {
    let formatter = Formatter::new();
    formatter.print_header("Payment");
    print_steps(flow.wizard());
    if let Some(draft) = flow.draft() {
        print_booking(draft, &flow.settings().currency);
    }

    match flow.payment_state() {
        PaymentState::Unselected { last_failure } => {
            if let Some(reason) = last_failure {
                io::print_warning(format!(
                    "The last payment attempt failed ({reason}). Choose a method to try again."
                ));
            }
            println!("  Payment methods:");
            for method in PaymentMethod::ALL {
                println!("    {:<11} {}", method.as_str(), method.label());
            }
            formatter.print_detail("Choose one with `pay <method>`.");
        }
        PaymentState::CardForm { method, card } => {
            println!("  Paying by {}.", method.label());
            for field in CardField::ALL {
                println!("    {:<7} {}", field.as_str(), or_dash(card.value(field)));
            }
            formatter.print_detail(
                "Fill in with `card <field> <value>`, then `submit`. `back` to change method.",
            );
        }
        PaymentState::CashConfirm => {
            println!(
                "  Pay {} in cash to your chauffeur.",
                flow.display_price()
            );
            formatter.print_detail("Type `confirm` to book, or `back` to change method.");
        }
        PaymentState::Confirmed { method, .. } => {
            println!("  Paid with {}.", method.label());
        }
    }
}

pub fn print_confirmation(confirmed: &ConfirmedBooking, currency: &CurrencyCode) {
    let formatter = Formatter::new();
    formatter.print_header("Booking confirmed");
    let mut rows = vec![
        ("Reference", confirmed.reference.clone()),
        (
            "Transaction",
            confirmed.receipt.transaction_id.to_string(),
        ),
        (
            "Processed",
            confirmed
                .receipt
                .processed_at
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
        ),
    ];
    rows.extend(booking_rows(&confirmed.booking, currency));
    formatter.print_two_column(&rows);
    formatter.print_detail("Your chauffeur will contact you before pickup.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{DraftUpdate, RouteInfo};

    #[test]
    fn rows_show_total_and_placeholders() {
        let vehicle = Catalog::builtin().find("mercedes-s-class").cloned().unwrap();
        let draft = BookingDraft::start(vehicle, RouteInfo::new("Dubai Marina", "DXB", 25.0))
            .apply(DraftUpdate::Name("Huda".into()));
        let rows = booking_rows(&draft, &CurrencyCode::default());
        assert_eq!(rows[0].1, "Mercedes-Benz S-Class (Sedan)");
        assert_eq!(rows[2].1, "Dubai Marina to DXB (25 km)");
        assert_eq!(rows[6].1, "-");
        assert_eq!(rows.last().map(|row| row.1.as_str()), Some("AED 125.00"));
    }

    #[test]
    fn fleet_line_lists_rates() {
        let vehicle = Catalog::builtin().find("bmw-7").unwrap();
        assert_eq!(
            vehicle_line(2, vehicle, &CurrencyCode::default()),
            "2. BMW 7 Series [bmw-7] Sedan, up to 3 passengers, AED 4.50/km, AED 230.00/hour"
        );
    }
}
