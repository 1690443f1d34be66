
use chauffeur_core::booking::FlowVariant;
use cli_support::CliHarness;

#[test]
fn guided_booking_pays_by_card() {
    let harness = CliHarness::new();
    let output = harness.run_guided(
        "book\nexit\n",
        &[
            "3",
            "<BLANK>",
            "Khalid Mansour",
            "khalid@example.com",
            "+971 52 000 1111",
            "Emirates Towers",
            "Dubai Mall",
            "10",
            "2026-12-05",
            "09:15",
            "Two large suitcases",
            "yes",
            "Mastercard",
            "Khalid Mansour",
            "5555555555554444",
            "0828",
            "737",
            "yes",
        ],
    );

    let stdout = &output.stdout;
    assert!(stdout.contains("=== Step 1 of 9: Full name ==="), "{stdout}");
    assert!(stdout.contains("WARNING: Value cannot be empty"), "{stdout}");
    assert!(stdout.contains("Card number: 5555 5555 5555 4444"), "{stdout}");
    assert!(stdout.contains("Expiry (MM/YY): 08/28"), "{stdout}");
    assert!(stdout.contains("=== Booking confirmed ==="), "{stdout}");
    assert!(stdout.contains("Payment      Mastercard"), "{stdout}");
    assert!(stdout.contains("Notes        Two large suitcases"), "{stdout}");
    assert!(
        stdout.contains("Route        Emirates Towers to Dubai Mall (10 km)"),
        "{stdout}"
    );
    assert!(stdout.contains("Total        AED 60.00"), "{stdout}");
}

#[test]
fn escaping_the_details_form_pauses_the_booking() {
    let harness = CliHarness::new();
    let output = harness.run_guided("book\nstatus\nexit\n", &["1", "<ESC>"]);

    assert!(
        output
            .stdout
            .contains("Booking paused. Type `book` to pick up where you left off."),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("=== Booking: Details ==="));
    assert!(output.stdout.contains("Mercedes-Benz S-Class (Sedan)"));
}

#[test]
fn leaving_the_card_form_returns_to_the_method_list() {
    let harness = CliHarness::new();
    let output = harness.run_guided(
        "book\nexit\n",
        &[
            "2",
            "Noura",
            "noura@example.com",
            "0551234567",
            "<KEEP>",
            "<KEEP>",
            "<KEEP>",
            "2026-12-31",
            "23:30",
            "<BLANK>",
            "yes",
            "Visa",
            "<ESC>",
            "Cash on arrival",
            "yes",
        ],
    );

    assert_eq!(
        output.stdout.matches("Payment methods:").count(),
        2,
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("Payment      Cash on arrival"));
    assert!(output.stdout.contains("Total        AED 112.50"));
}

#[test]
fn fixed_route_booking_skips_route_and_schedule() {
    let harness = CliHarness::with_config(|config| config.flow_variant = FlowVariant::FixedRoute);
    let output = harness.run_guided(
        "book\nexit\n",
        &[
            "1",
            "Hamdan Saeed",
            "hamdan@example.com",
            "0507654321",
            "<BLANK>",
            "yes",
            "Cash on arrival",
            "yes",
        ],
    );

    let stdout = &output.stdout;
    assert!(stdout.contains("=== Step 1 of 4: Full name ==="), "{stdout}");
    assert!(!stdout.contains("Pickup location"), "{stdout}");
    assert!(
        stdout.contains("Route        Dubai Marina to Dubai International Airport (25 km)"),
        "{stdout}"
    );
    assert!(stdout.contains("Total        AED 125.00"), "{stdout}");
}

#[test]
fn guided_booking_needs_prompts() {
    let harness = CliHarness::new();
    let output = harness.run_script("book\nexit\n");
    assert!(output
        .stdout
        .contains("`book` needs an interactive terminal"));
}
