use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::navigation::{Carried, Landing, Navigator, Screen};
use crate::{
    booking::{
        validate, BookingDraft, DraftUpdate, FlowVariant, RouteInfo, StepWizard,
        ValidationOutcome, WizardStep,
    },
    catalog::Catalog,
    config::Config,
    currency::{format_price, CurrencyCode},
    errors::{BookingError, Result},
    payment::{
        CardDetails, CardField, PaymentGateway, PaymentMethod, PaymentOrder, PaymentReceipt,
        PaymentSelector, PaymentState,
    },
};

/// Configuration slice the booking flow depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub variant: FlowVariant,
    pub demo_route: RouteInfo,
    pub currency: CurrencyCode,
}

impl FlowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            variant: config.flow_variant,
            demo_route: config.demo_route.clone(),
            currency: CurrencyCode::new(config.currency.clone()),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A paid booking as shown on the confirmation screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfirmedBooking {
    pub reference: String,
    pub booking: BookingDraft,
    pub receipt: PaymentReceipt,
}

impl ConfirmedBooking {
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.booking.payment_method()
    }
}

fn reference_for(id: Uuid) -> String {
    let simple = id.simple().to_string();
    format!("LC-{}", simple[..8].to_ascii_uppercase())
}

/// Session-scoped booking flow: wizard, draft, payment and navigation.
///
/// Nothing here outlives the session. Restarting, or navigating somewhere the
/// carried state cannot support, discards the draft.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    catalog: Catalog,
    settings: FlowSettings,
    wizard: StepWizard,
    navigator: Navigator,
    draft: Option<BookingDraft>,
    payment: PaymentSelector,
    confirmed: Option<ConfirmedBooking>,
}

impl BookingFlow {
    pub fn new(catalog: Catalog, settings: FlowSettings) -> Self {
        Self {
            catalog,
            settings,
            wizard: StepWizard::new(),
            navigator: Navigator::new(),
            draft: None,
            payment: PaymentSelector::new(),
            confirmed: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Catalog::builtin().clone(), FlowSettings::from_config(config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Swaps in new settings. The draft in progress keeps its route.
    pub fn set_settings(&mut self, settings: FlowSettings) {
        self.settings = settings;
    }

    pub fn wizard(&self) -> &StepWizard {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.current()
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        self.draft.as_ref()
    }

    /// Draft in progress or, once paid, the confirmed booking.
    pub fn booking(&self) -> Option<&BookingDraft> {
        self.draft
            .as_ref()
            .or_else(|| self.confirmed.as_ref().map(|confirmed| &confirmed.booking))
    }

    pub fn payment(&self) -> &PaymentSelector {
        &self.payment
    }

    pub fn payment_state(&self) -> &PaymentState {
        self.payment.state()
    }

    pub fn confirmation(&self) -> Option<&ConfirmedBooking> {
        self.confirmed.as_ref()
    }

    /// Price of the current booking ready for display.
    pub fn display_price(&self) -> String {
        format_price(
            self.booking().and_then(BookingDraft::price),
            &self.settings.currency,
        )
    }

    fn stage(&self) -> &'static str {
        match self.wizard.current() {
            WizardStep::Route => "choosing a vehicle",
            WizardStep::Details => "the details form is open",
            WizardStep::Payment => "payment is in progress",
            WizardStep::Confirmation => "the booking is already confirmed",
        }
    }

    fn ensure_editable(&self, action: &'static str) -> Result<()> {
        match self.wizard.current() {
            WizardStep::Route | WizardStep::Details => Ok(()),
            _ => Err(BookingError::InvalidTransition {
                state: self.stage(),
                action,
            }),
        }
    }

    /// Picks a vehicle by id or list position, starting a draft if needed.
    pub fn select_vehicle(&mut self, key: &str) -> Result<&BookingDraft> {
        if self.confirmed.is_some() {
            self.restart();
        }
        self.ensure_editable("change the vehicle")?;
        let vehicle = self
            .catalog
            .resolve(key)
            .cloned()
            .ok_or_else(|| BookingError::UnknownVehicle(key.trim().to_string()))?;
        tracing::info!(vehicle = %vehicle.id, "vehicle selected");

        let draft = match self.draft.take() {
            Some(draft) => draft.apply(DraftUpdate::Vehicle(vehicle)),
            None => BookingDraft::start(vehicle, self.settings.demo_route.clone()),
        };
        Ok(self.draft.insert(draft))
    }

    pub fn update(&mut self, update: DraftUpdate) -> Result<&BookingDraft> {
        self.ensure_editable("edit the booking")?;
        let draft = self.draft.take().ok_or(BookingError::MissingContext)?;
        Ok(self.draft.insert(draft.apply(update)))
    }

    pub fn validate(&self) -> Result<ValidationOutcome> {
        let draft = self.draft.as_ref().ok_or(BookingError::MissingContext)?;
        Ok(validate(draft, self.settings.variant))
    }

    /// Leaves the route step once a vehicle is chosen.
    pub fn continue_to_details(&mut self) -> Result<WizardStep> {
        if self.wizard.current() != WizardStep::Route {
            return Err(BookingError::InvalidTransition {
                state: self.stage(),
                action: "continue to details",
            });
        }
        let draft = self.draft.as_ref().ok_or(BookingError::MissingContext)?;
        let step = self.wizard.advance();
        self.navigator.push(Screen::Details, Carried::Draft(draft));
        Ok(step)
    }

    /// Validates the draft and moves on to payment.
    ///
    /// Every missing field is reported at once and nothing advances until the
    /// draft passes.
    pub fn submit_details(&mut self) -> Result<WizardStep> {
        if !matches!(
            self.wizard.current(),
            WizardStep::Route | WizardStep::Details
        ) {
            return Err(BookingError::InvalidTransition {
                state: self.stage(),
                action: "submit booking details",
            });
        }
        if let ValidationOutcome::Invalid { missing_fields } = self.validate()? {
            tracing::info!(missing = missing_fields.len(), "booking details incomplete");
            return Err(BookingError::MissingFields(missing_fields));
        }

        while self.wizard.current() != WizardStep::Payment {
            self.wizard.advance();
        }
        let draft = self.draft.as_ref().ok_or(BookingError::MissingContext)?;
        self.navigator.push(Screen::Payment, Carried::Draft(draft));
        Ok(self.wizard.current())
    }

    fn require_payment(&mut self, action: &'static str) -> Result<()> {
        if self.confirmed.is_some() {
            return Err(BookingError::InvalidTransition {
                state: self.stage(),
                action,
            });
        }
        if self.draft.is_none() {
            self.open(Screen::Payment);
            return Err(BookingError::MissingContext);
        }
        if self.wizard.current() != WizardStep::Payment {
            return Err(BookingError::InvalidTransition {
                state: self.stage(),
                action,
            });
        }
        Ok(())
    }

    pub fn choose_payment(&mut self, method: PaymentMethod) -> Result<&PaymentState> {
        self.require_payment("choose a payment method")?;
        self.payment.choose(method)
    }

    pub fn payment_back(&mut self) -> Result<()> {
        self.require_payment("go back")?;
        self.payment.back()
    }

    pub fn update_card(&mut self, field: CardField, raw: &str) -> Result<&CardDetails> {
        self.require_payment("edit card details")?;
        self.payment.update_card(field, raw)
    }

    pub fn submit_card(&mut self, gateway: &dyn PaymentGateway) -> Result<&ConfirmedBooking> {
        self.require_payment("submit card details")?;
        let order = self.order()?;
        let receipt = self.payment.submit_card(gateway, &order)?;
        self.finish(receipt)
    }

    pub fn confirm_cash(&mut self, gateway: &dyn PaymentGateway) -> Result<&ConfirmedBooking> {
        self.require_payment("confirm a cash payment")?;
        let order = self.order()?;
        let receipt = self.payment.confirm_cash(gateway, &order)?;
        self.finish(receipt)
    }

    fn order(&self) -> Result<PaymentOrder> {
        let draft = self.draft.as_ref().ok_or(BookingError::MissingContext)?;
        Ok(PaymentOrder {
            booking_id: draft.id(),
            amount: draft.price().unwrap_or(0.0),
            currency: self.settings.currency.as_str().to_string(),
        })
    }

    fn finish(&mut self, receipt: PaymentReceipt) -> Result<&ConfirmedBooking> {
        let draft = self
            .draft
            .take()
            .ok_or(BookingError::MissingContext)?
            .with_payment_method(receipt.method);
        self.wizard.advance();
        let confirmed = ConfirmedBooking {
            reference: reference_for(draft.id()),
            booking: draft,
            receipt,
        };
        self.navigator
            .push(Screen::Confirmation, Carried::Confirmed(&confirmed));
        tracing::info!(reference = %confirmed.reference, "booking confirmed");
        Ok(self.confirmed.insert(confirmed))
    }

    /// Requests a screen directly. Screens whose context is missing send the
    /// user back to vehicle selection, which abandons the booking.
    pub fn open(&mut self, target: Screen) -> Landing {
        let carried = match target {
            Screen::Confirmation => self
                .confirmed
                .as_ref()
                .map_or(Carried::Nothing, Carried::Confirmed),
            Screen::Details | Screen::Payment if self.wizard.current() == target.step() => self
                .draft
                .as_ref()
                .map_or(Carried::Nothing, Carried::Draft),
            _ => Carried::Nothing,
        };
        let landing = self.navigator.push(target, carried);
        if landing.screen == Screen::VehicleSelection {
            self.restart();
        }
        landing
    }

    /// Drops everything and returns to the first step.
    pub fn restart(&mut self) {
        if self.draft.is_some() || self.confirmed.is_some() {
            tracing::info!("booking flow restarted");
        }
        self.wizard.reset();
        self.navigator.reset();
        self.draft = None;
        self.payment.reset();
        self.confirmed = None;
    }
}
