use chauffeur_core::booking::{
    compute_price, validate, BookingDraft, DraftField, DraftUpdate, FlowVariant, RouteInfo,
    StepWizard, ValidationOutcome, WizardStep,
};
use chauffeur_core::catalog::Catalog;
use chauffeur_core::cli::output::OutputPreferences;
use chauffeur_core::cli::ui::steps::render_steps;
use chauffeur_core::errors::BookingError;
use chauffeur_core::flow::{BookingFlow, FlowSettings, Screen};
use chauffeur_core::payment::{
    format_card_number, format_cvc, format_expiry, CardField, PaymentMethod, PaymentState,
    SimulatedGateway,
};
use chrono::{NaiveDate, NaiveTime};
use insta::assert_snapshot;

fn flow() -> BookingFlow {
    BookingFlow::new(Catalog::builtin().clone(), FlowSettings::default())
}

fn fill_contact(flow: &mut BookingFlow) {
    for update in [
        DraftUpdate::Name("Mariam Al Nuaimi".into()),
        DraftUpdate::Email("mariam@example.com".into()),
        DraftUpdate::Phone("+971 55 111 2222".into()),
        DraftUpdate::Date(NaiveDate::from_ymd_opt(2026, 11, 3)),
        DraftUpdate::Time(NaiveTime::from_hms_opt(6, 30, 0)),
    ] {
        flow.update(update).unwrap();
    }
}

#[test]
fn cash_booking_runs_end_to_end() {
    let mut flow = flow();
    flow.select_vehicle("mercedes-s-class").unwrap();
    assert_eq!(flow.display_price(), "AED 125.00");

    flow.continue_to_details().unwrap();
    fill_contact(&mut flow);
    assert_eq!(flow.submit_details().unwrap(), WizardStep::Payment);
    assert_eq!(flow.screen(), Screen::Payment);

    flow.choose_payment(PaymentMethod::Cash).unwrap();
    assert_eq!(flow.payment_state(), &PaymentState::CashConfirm);
    let confirmed = flow.confirm_cash(&SimulatedGateway::instant()).unwrap();

    assert_eq!(confirmed.payment_method(), Some(PaymentMethod::Cash));
    assert_eq!(confirmed.booking.contact().name, "Mariam Al Nuaimi");
    assert_eq!(confirmed.receipt.amount, 125.0);
    assert!(confirmed.reference.starts_with("LC-"));
    assert_eq!(flow.step(), WizardStep::Confirmation);
    assert_eq!(flow.screen(), Screen::Confirmation);
    assert!(flow.draft().is_none());
}

#[test]
fn card_booking_masks_input_and_confirms() {
    let mut flow = flow();
    flow.select_vehicle("2").unwrap();
    fill_contact(&mut flow);
    flow.submit_details().unwrap();

    flow.choose_payment(PaymentMethod::Visa).unwrap();
    flow.update_card(CardField::Holder, "Mariam Al Nuaimi").unwrap();
    let card = flow
        .update_card(CardField::Number, "4111-1111-1111-1111")
        .unwrap();
    assert_eq!(card.value(CardField::Number), "4111 1111 1111 1111");
    flow.update_card(CardField::Expiry, "0731").unwrap();
    flow.update_card(CardField::Cvc, "9876").unwrap();

    let confirmed = flow.submit_card(&SimulatedGateway::instant()).unwrap();
    assert_eq!(confirmed.payment_method(), Some(PaymentMethod::Visa));
    assert_eq!(confirmed.booking.price(), Some(112.5));
}

#[test]
fn submission_is_blocked_until_every_field_is_present() {
    let mut flow = flow();
    flow.select_vehicle("range-rover").unwrap();
    flow.update(DraftUpdate::Name("Omar".into())).unwrap();

    match flow.submit_details() {
        Err(BookingError::MissingFields(fields)) => assert_eq!(
            fields,
            vec![
                DraftField::Email,
                DraftField::Phone,
                DraftField::Date,
                DraftField::Time
            ]
        ),
        other => panic!("expected missing fields, got {other:?}"),
    }
    assert_eq!(flow.step(), WizardStep::Route);
}

#[test]
fn fixed_route_variant_needs_a_distance_instead_of_a_schedule() {
    let vehicle = Catalog::builtin().find("bmw-7").cloned().unwrap();
    let draft = BookingDraft::start(vehicle, RouteInfo::new("Marina", "Downtown", 0.0)).apply_all([
        DraftUpdate::Name("Sara".into()),
        DraftUpdate::Email("sara@example.com".into()),
        DraftUpdate::Phone("050".into()),
    ]);
    assert_eq!(
        validate(&draft, FlowVariant::FixedRoute),
        ValidationOutcome::Invalid {
            missing_fields: vec![DraftField::Distance]
        }
    );

    let draft = draft.apply(DraftUpdate::Distance(18.0));
    assert!(validate(&draft, FlowVariant::FixedRoute).is_valid());
    assert_eq!(draft.price(), Some(81.0));
}

#[test]
fn opening_payment_without_a_draft_redirects_to_vehicle_selection() {
    let mut flow = flow();
    let landing = flow.open(Screen::Payment);
    assert!(landing.redirected);
    assert_eq!(landing.screen, Screen::VehicleSelection);

    assert!(matches!(
        flow.choose_payment(PaymentMethod::Amex),
        Err(BookingError::MissingContext)
    ));
}

#[test]
fn opening_confirmation_before_payment_abandons_the_draft() {
    let mut flow = flow();
    flow.select_vehicle("1").unwrap();
    let landing = flow.open(Screen::Confirmation);
    assert!(landing.redirected);
    assert!(flow.draft().is_none());
    assert_eq!(flow.step(), WizardStep::Route);
}

#[test]
fn declined_payment_keeps_the_booking_unconfirmed() {
    let mut flow = flow();
    flow.select_vehicle("mercedes-v").unwrap();
    fill_contact(&mut flow);
    flow.submit_details().unwrap();
    flow.choose_payment(PaymentMethod::Cash).unwrap();

    let gateway = SimulatedGateway::declining(std::time::Duration::ZERO, "network down");
    assert!(matches!(
        flow.confirm_cash(&gateway),
        Err(BookingError::PaymentFailed(_))
    ));
    assert_eq!(flow.payment().last_failure(), Some("card declined: network down"));
    assert!(flow.confirmation().is_none());

    flow.choose_payment(PaymentMethod::Cash).unwrap();
    assert!(flow.confirm_cash(&SimulatedGateway::instant()).is_ok());
}

#[test]
fn formatters_match_the_documented_examples() {
    assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
    assert_eq!(format_card_number("4242 4242 4242 4242 99"), "4242 4242 4242 4242");
    assert_eq!(format_expiry("1"), "1");
    assert_eq!(format_expiry("125"), "12/5");
    assert_eq!(format_expiry("12/2030"), "12/20");
    assert_eq!(format_cvc("12a34"), "123");
}

#[test]
fn price_is_distance_times_rate() {
    for vehicle in Catalog::builtin().vehicles() {
        assert_eq!(compute_price(10.0, vehicle), 10.0 * vehicle.price_per_km);
        assert_eq!(compute_price(0.0, vehicle), 0.0);
    }
}

#[test]
fn step_indicator_renders_progress() {
    let mut wizard = StepWizard::new();
    wizard.advance();
    wizard.advance();
    let plain = OutputPreferences { plain_mode: true };
    assert_snapshot!(
        render_steps(&wizard, &plain),
        @"[x] Route > [x] Details > [>] Payment > [ ] Confirmation"
    );
}
