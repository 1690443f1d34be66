use crate::cli::core::ShellContext;
use crate::cli::output::current_preferences;
use crate::flow::BookingFlow;

pub struct Banner;

impl Banner {
    /// Shell prompt naming the current screen and the vehicle in the draft.
    pub fn text(context: &ShellContext) -> String {
        Self::for_flow(&context.flow, current_preferences().plain_mode)
    }

    pub fn for_flow(flow: &BookingFlow, plain: bool) -> String {
        let screen = flow.screen().as_str();
        let vehicle_segment = flow
            .booking()
            .and_then(|booking| booking.vehicle())
            .map(|vehicle| format!(" [{}]", vehicle.id))
            .unwrap_or_default();
        let arrow = if plain { ">" } else { "⮞" };
        format!("chauffeur ({screen}){vehicle_segment} {arrow} ")
    }
}
