use serde::{Deserialize, Serialize};

use super::session::ConfirmedBooking;
use crate::booking::{BookingDraft, WizardStep};

/// Logical screens of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    VehicleSelection,
    Details,
    Payment,
    Confirmation,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::VehicleSelection => "vehicle-selection",
            Screen::Details => "details",
            Screen::Payment => "payment",
            Screen::Confirmation => "confirmation",
        }
    }

    /// Wizard step highlighted while this screen is shown.
    pub fn step(&self) -> WizardStep {
        match self {
            Screen::VehicleSelection => WizardStep::Route,
            Screen::Details => WizardStep::Details,
            Screen::Payment => WizardStep::Payment,
            Screen::Confirmation => WizardStep::Confirmation,
        }
    }
}

/// State handed from one screen to the next. Never persisted.
#[derive(Debug, Clone, Copy)]
pub enum Carried<'a> {
    Nothing,
    Draft(&'a BookingDraft),
    Confirmed(&'a ConfirmedBooking),
}

/// Where a navigation request actually ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub screen: Screen,
    pub redirected: bool,
}

/// Tracks the visible screen and refuses to show screens without their context.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::VehicleSelection,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Pushes `target`, falling back to vehicle selection when the carried
    /// state cannot back the requested screen.
    pub fn push(&mut self, target: Screen, carried: Carried<'_>) -> Landing {
        let allowed = match (target, carried) {
            (Screen::VehicleSelection, _) => true,
            (Screen::Details | Screen::Payment, Carried::Draft(draft)) => draft.vehicle().is_some(),
            (Screen::Confirmation, Carried::Confirmed(_)) => true,
            _ => false,
        };

        if allowed {
            self.current = target;
            tracing::debug!(screen = target.as_str(), "navigated");
            Landing {
                screen: target,
                redirected: false,
            }
        } else {
            tracing::warn!(
                requested = target.as_str(),
                "missing booking context, redirecting to vehicle selection"
            );
            self.current = Screen::VehicleSelection;
            Landing {
                screen: Screen::VehicleSelection,
                redirected: true,
            }
        }
    }

    pub fn reset(&mut self) {
        self.current = Screen::VehicleSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::RouteInfo;
    use crate::catalog::Catalog;

    fn draft_with_vehicle() -> BookingDraft {
        let vehicle = Catalog::builtin().find("bmw-7").cloned().unwrap();
        BookingDraft::start(vehicle, RouteInfo::new("A", "B", 5.0))
    }

    #[test]
    fn payment_without_draft_redirects_to_start() {
        let mut navigator = Navigator::new();
        let landing = navigator.push(Screen::Payment, Carried::Nothing);
        assert_eq!(
            landing,
            Landing {
                screen: Screen::VehicleSelection,
                redirected: true
            }
        );
    }

    #[test]
    fn confirmation_requires_confirmed_booking() {
        let mut navigator = Navigator::new();
        let draft = draft_with_vehicle();
        let landing = navigator.push(Screen::Confirmation, Carried::Draft(&draft));
        assert!(landing.redirected);
        assert_eq!(navigator.current(), Screen::VehicleSelection);
    }

    #[test]
    fn draft_carries_into_payment() {
        let mut navigator = Navigator::new();
        let draft = draft_with_vehicle();
        let landing = navigator.push(Screen::Payment, Carried::Draft(&draft));
        assert!(!landing.redirected);
        assert_eq!(navigator.current(), Screen::Payment);
        assert_eq!(navigator.current().step(), WizardStep::Payment);
    }

    #[test]
    fn draft_without_vehicle_cannot_open_details() {
        let mut navigator = Navigator::new();
        let draft = BookingDraft::new(RouteInfo::default());
        assert!(navigator.push(Screen::Details, Carried::Draft(&draft)).redirected);
    }
}
