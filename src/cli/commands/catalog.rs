use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgCompletion, CommandEntry};
use crate::cli::ui::summary;
use crate::errors::BookingError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "vehicles",
        "List the fleet or show one vehicle in detail",
        "vehicles [id|number]",
        cmd_vehicles,
    )
    .completing(ArgCompletion::Vehicles)]
}

fn cmd_vehicles(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let flow = &context.flow;
    let currency = &flow.settings().currency;

    if let Some(key) = args.first() {
        let vehicle = flow
            .catalog()
            .resolve(key)
            .ok_or_else(|| BookingError::UnknownVehicle(key.to_string()))?;
        let distance = flow
            .draft()
            .map(|draft| draft.route().distance_km)
            .unwrap_or(flow.settings().demo_route.distance_km);
        summary::print_vehicle(vehicle, distance, currency);
        return Ok(());
    }

    let selected = flow
        .booking()
        .and_then(|booking| booking.vehicle())
        .map(|vehicle| vehicle.id.as_str());
    summary::print_fleet(flow.catalog(), selected, currency);
    io::print_hint("Pick one with `select <id|number>`.");
    Ok(())
}
