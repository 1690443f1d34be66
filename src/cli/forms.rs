//! Wizard-style form framework used by the guided booking.
//!
//! A [`FormFlow`] describes its fields and turns the collected strings into a
//! typed output. [`FormEngine`] walks the fields through a [`FormInteraction`],
//! which is either the terminal prompts or a scripted double in tests.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::booking::{parse_distance, BookingDraft, DraftUpdate, FlowVariant};
use crate::cli::core::CommandError;
use crate::cli::io;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{
    confirm_menu, text_input, ConfirmationPromptResult, InputMask, TextPromptResult,
};
use crate::payment::{format_card_number, format_cvc, format_expiry, CardField};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Value(String),
    /// Keep the default/current value.
    Keep,
    Cancel,
    /// Go back to the previous field.
    Back,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Validator {
    None,
    NonEmpty,
    PositiveNumber,
    Date,
    Time,
}

impl Validator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        match self {
            Validator::None => Ok(trimmed.to_string()),
            Validator::NonEmpty => {
                if trimmed.is_empty() {
                    Err(ValidationError::new("Value cannot be empty"))
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Validator::PositiveNumber => {
                let value = parse_distance(trimmed);
                if value > 0.0 {
                    Ok(value.to_string())
                } else {
                    Err(ValidationError::new("Enter a number greater than zero"))
                }
            }
            Validator::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(|date| date.format(DATE_FORMAT).to_string())
                .map_err(|_| ValidationError::new("Use YYYY-MM-DD format")),
            Validator::Time => NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
                .map(|time| time.format(TIME_FORMAT).to_string())
                .map_err(|_| ValidationError::new("Use 24-hour HH:MM format")),
        }
    }
}

/// Declarative description of a single form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub help: Option<&'static str>,
    pub validator: Validator,
    pub mask: Option<InputMask>,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, validator: Validator) -> Self {
        Self {
            key,
            label,
            required: true,
            help: None,
            validator,
            mask: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Formats every keystroke with `mask`.
    pub fn with_mask(mut self, mask: InputMask) -> Self {
        self.mask = Some(mask);
        self
    }
}

pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }
}

pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<&'a str>,
    pub index: usize,
    pub total: usize,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;
}

/// Terminal implementation backed by the shared prompt components.
#[derive(Default)]
pub struct WizardInteraction;

impl WizardInteraction {
    pub fn new() -> Self {
        Self
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        render_prompt(context);
        match text_input(
            context.descriptor.label,
            context.default,
            context.descriptor.mask,
        ) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            Ok(TextPromptResult::Escape) if context.index > 0 => PromptResponse::Back,
            Ok(TextPromptResult::Escape | TextPromptResult::Cancel) | Err(_) => {
                PromptResponse::Cancel
            }
        }
    }
}

impl FormInteraction for WizardInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.prompt_text(context)
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        for line in lines {
            println!("{line}");
        }
        match confirm_menu("Review entries") {
            Ok(ConfirmationPromptResult::Confirm) => ConfirmationResponse::Confirm,
            Ok(ConfirmationPromptResult::Back) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

fn step_title(context: &PromptContext<'_>) -> String {
    format!(
        "Step {} of {}: {}",
        context.index + 1,
        context.total,
        context.descriptor.label
    )
}

fn render_prompt(context: &PromptContext<'_>) {
    let formatter = Formatter::new();
    formatter.print_header(step_title(context));
    if let Some(default_value) = context.default {
        formatter.print_detail(format!("Current: {}", default_value));
    }
    if let Some(help) = context.descriptor.help {
        formatter.print_detail(help);
    }
    let mut instructions = vec!["Type a value and press Enter.".to_string()];
    if context.index == 0 {
        instructions.push("ESC cancels.".into());
    } else {
        instructions.push("ESC or :back returns to the previous field.".into());
    }
    formatter.print_detail(instructions.join(" "));
}

/// In-progress form state. [`FormEngine::run`] drives the full loop.
pub struct FormSession<'a> {
    descriptor: &'a FormDescriptor,
    values: BTreeMap<String, String>,
    index: usize,
    cancelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSessionEvent {
    Moved,
    Repeat,
    Cancelled,
}

impl<'a> FormSession<'a> {
    pub fn new(descriptor: &'a FormDescriptor, defaults: BTreeMap<String, String>) -> Self {
        Self {
            descriptor,
            values: defaults,
            index: 0,
            cancelled: false,
        }
    }

    pub fn current_field(&self) -> Option<&'a FieldDescriptor> {
        self.descriptor.fields.get(self.index)
    }

    pub fn apply_response(
        &mut self,
        response: PromptResponse,
    ) -> Result<FormSessionEvent, ValidationError> {
        let Some(field) = self.current_field() else {
            return Ok(FormSessionEvent::Repeat);
        };

        match response {
            PromptResponse::Cancel => {
                self.cancelled = true;
                Ok(FormSessionEvent::Cancelled)
            }
            PromptResponse::Back => {
                if self.index > 0 {
                    self.index -= 1;
                    Ok(FormSessionEvent::Moved)
                } else {
                    io::print_warning("Already at the first field.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Help => {
                io::print_info(
                    field
                        .help
                        .unwrap_or("No additional information available for this field."),
                );
                Ok(FormSessionEvent::Repeat)
            }
            PromptResponse::Keep => {
                if self.values.contains_key(field.key) || !field.required {
                    self.index += 1;
                    Ok(FormSessionEvent::Moved)
                } else {
                    io::print_warning("This field is required.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Value(raw) => {
                if raw.trim().is_empty() && !field.required {
                    self.values.remove(field.key);
                    self.index += 1;
                    return Ok(FormSessionEvent::Moved);
                }
                match field.validator.validate(&raw) {
                    Ok(value) => {
                        self.values.insert(field.key.to_string(), value);
                        self.index += 1;
                        Ok(FormSessionEvent::Moved)
                    }
                    Err(err) => {
                        io::print_warning(&err.message);
                        Err(err)
                    }
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.descriptor.fields.len()
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Entity-specific form contract.
pub trait FormFlow {
    type Output;
    type Error;

    fn descriptor(&self) -> &FormDescriptor;

    /// Values used to pre-populate the session.
    fn defaults(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Builds the typed output after the user confirms.
    fn commit(&self, values: BTreeMap<String, String>) -> Result<Self::Output, Self::Error>;
}

pub struct FormEngine<'a, F: FormFlow> {
    flow: &'a F,
}

impl<'a, F: FormFlow> FormEngine<'a, F> {
    pub fn new(flow: &'a F) -> Self {
        Self { flow }
    }

    pub fn run<I: FormInteraction>(
        &self,
        interaction: &mut I,
    ) -> Result<FormResult<F::Output>, F::Error> {
        let descriptor = self.flow.descriptor();
        let mut session = FormSession::new(descriptor, self.flow.defaults());

        loop {
            if session.cancelled {
                return Ok(FormResult::Cancelled);
            }

            if session.is_complete() {
                let lines = summary_lines(descriptor, session.values());
                match interaction.confirm(&lines) {
                    ConfirmationResponse::Confirm => {
                        let output = self.flow.commit(session.values().clone())?;
                        return Ok(FormResult::Completed(output));
                    }
                    ConfirmationResponse::Back if !descriptor.fields.is_empty() => {
                        session.index = descriptor.fields.len() - 1;
                        continue;
                    }
                    _ => return Ok(FormResult::Cancelled),
                }
            }

            let Some(field) = session.current_field() else {
                continue;
            };
            let response = {
                let context = PromptContext {
                    descriptor: field,
                    default: session.values().get(field.key).map(String::as_str),
                    index: session.index,
                    total: descriptor.fields.len(),
                };
                interaction.prompt_field(&context)
            };

            // Validation failures are reported by the session; ask again.
            let _ = session.apply_response(response);
        }
    }
}

fn summary_lines(descriptor: &FormDescriptor, values: &BTreeMap<String, String>) -> Vec<String> {
    let mut lines = vec![format!("Review your {}:", descriptor.name)];
    for field in &descriptor.fields {
        let value = values
            .get(field.key)
            .map(String::as_str)
            .unwrap_or("[unfilled]");
        lines.push(format!("  {}: {}", field.label, value));
    }
    lines
}

fn required_value(values: &BTreeMap<String, String>, key: &str) -> Result<String, CommandError> {
    values
        .get(key)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing value for `{key}`")))
}

/// Passenger details for the draft, shaped by the flow variant.
pub struct DetailsForm {
    descriptor: FormDescriptor,
    defaults: BTreeMap<String, String>,
}

impl DetailsForm {
    pub fn new(variant: FlowVariant, draft: &BookingDraft) -> Self {
        let mut fields = vec![
            FieldDescriptor::new("name", "Full name", Validator::NonEmpty),
            FieldDescriptor::new("email", "Email", Validator::NonEmpty),
            FieldDescriptor::new("phone", "Phone", Validator::NonEmpty),
        ];
        // The fixed-route variant books the configured demo route as is.
        if variant == FlowVariant::Scheduled {
            fields.extend([
                FieldDescriptor::new("pickup", "Pickup location", Validator::NonEmpty),
                FieldDescriptor::new("dropoff", "Drop-off location", Validator::NonEmpty),
                FieldDescriptor::new("distance", "Distance (km)", Validator::PositiveNumber)
                    .with_help("The fare is the distance times the vehicle's rate per km."),
                FieldDescriptor::new("date", "Pickup date", Validator::Date)
                    .with_help("Use YYYY-MM-DD, e.g. 2026-12-01."),
                FieldDescriptor::new("time", "Pickup time", Validator::Time)
                    .with_help("Use 24-hour HH:MM, e.g. 09:30."),
            ]);
        }
        fields.push(
            FieldDescriptor::new("notes", "Notes", Validator::None)
                .with_optional()
                .with_help("Flight number, luggage or anything the chauffeur should know."),
        );

        Self {
            descriptor: FormDescriptor::new("booking details", fields),
            defaults: draft_defaults(draft),
        }
    }
}

fn draft_defaults(draft: &BookingDraft) -> BTreeMap<String, String> {
    let mut defaults = BTreeMap::new();
    let contact = draft.contact();
    for (key, value) in [
        ("name", &contact.name),
        ("email", &contact.email),
        ("phone", &contact.phone),
    ] {
        if !value.trim().is_empty() {
            defaults.insert(key.to_string(), value.clone());
        }
    }
    if let Some(notes) = &contact.notes {
        defaults.insert("notes".into(), notes.clone());
    }
    if let Some(date) = draft.date() {
        defaults.insert("date".into(), date.format(DATE_FORMAT).to_string());
    }
    if let Some(time) = draft.time() {
        defaults.insert("time".into(), time.format(TIME_FORMAT).to_string());
    }
    let route = draft.route();
    if !route.pickup.is_empty() {
        defaults.insert("pickup".into(), route.pickup.clone());
    }
    if !route.dropoff.is_empty() {
        defaults.insert("dropoff".into(), route.dropoff.clone());
    }
    if route.distance_km > 0.0 {
        defaults.insert("distance".into(), route.distance_km.to_string());
    }
    defaults
}

impl FormFlow for DetailsForm {
    type Output = Vec<DraftUpdate>;
    type Error = CommandError;

    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn defaults(&self) -> BTreeMap<String, String> {
        self.defaults.clone()
    }

    fn commit(&self, values: BTreeMap<String, String>) -> Result<Self::Output, Self::Error> {
        let mut updates = vec![
            DraftUpdate::Name(required_value(&values, "name")?),
            DraftUpdate::Email(required_value(&values, "email")?),
            DraftUpdate::Phone(required_value(&values, "phone")?),
        ];
        for field in &self.descriptor.fields {
            let Some(value) = values.get(field.key) else {
                continue;
            };
            match field.key {
                "date" => updates.push(DraftUpdate::Date(
                    NaiveDate::parse_from_str(value, DATE_FORMAT).ok(),
                )),
                "time" => updates.push(DraftUpdate::Time(
                    NaiveTime::parse_from_str(value, TIME_FORMAT).ok(),
                )),
                "pickup" => updates.push(DraftUpdate::Pickup(value.clone())),
                "dropoff" => updates.push(DraftUpdate::Dropoff(value.clone())),
                "distance" => updates.push(DraftUpdate::Distance(parse_distance(value))),
                _ => {}
            }
        }
        updates.push(DraftUpdate::Notes(
            values.get("notes").cloned().unwrap_or_default(),
        ));
        Ok(updates)
    }
}

/// Card entry with the number, expiry and CVC masks applied per keystroke.
pub struct CardForm {
    descriptor: FormDescriptor,
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CardForm {
    pub fn new() -> Self {
        let field = |card: CardField, label: &'static str| {
            FieldDescriptor::new(card.as_str(), label, Validator::NonEmpty)
        };
        let fields = vec![
            field(CardField::Holder, "Cardholder name"),
            field(CardField::Number, "Card number").with_mask(format_card_number),
            field(CardField::Expiry, "Expiry (MM/YY)").with_mask(format_expiry),
            field(CardField::Cvc, "CVC").with_mask(format_cvc),
        ];
        Self {
            descriptor: FormDescriptor::new("card details", fields),
        }
    }
}

impl FormFlow for CardForm {
    type Output = Vec<(CardField, String)>;
    type Error = CommandError;

    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn commit(&self, values: BTreeMap<String, String>) -> Result<Self::Output, Self::Error> {
        CardField::ALL
            .into_iter()
            .map(|field| Ok((field, required_value(&values, field.as_str())?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::RouteInfo;
    use std::collections::VecDeque;

    struct MockInteraction {
        prompts: VecDeque<PromptResponse>,
        confirmations: VecDeque<ConfirmationResponse>,
        seen_defaults: Vec<Option<String>>,
    }

    impl MockInteraction {
        fn new(prompts: Vec<PromptResponse>, confirmations: Vec<ConfirmationResponse>) -> Self {
            Self {
                prompts: prompts.into(),
                confirmations: confirmations.into(),
                seen_defaults: Vec::new(),
            }
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.seen_defaults.push(context.default.map(str::to_string));
            self.prompts.pop_front().unwrap_or(PromptResponse::Cancel)
        }

        fn confirm(&mut self, _lines: &[String]) -> ConfirmationResponse {
            self.confirmations
                .pop_front()
                .unwrap_or(ConfirmationResponse::Confirm)
        }
    }

    fn value(raw: &str) -> PromptResponse {
        PromptResponse::Value(raw.into())
    }

    fn empty_draft() -> BookingDraft {
        BookingDraft::new(RouteInfo::new("Dubai Marina", "DXB", 25.0))
    }

    #[test]
    fn details_form_produces_typed_updates() {
        let form = DetailsForm::new(FlowVariant::Scheduled, &empty_draft());
        let mut interaction = MockInteraction::new(
            vec![
                value("Noor Saleh"),
                value("noor@example.com"),
                value("+971 50 111 2222"),
                value("Dubai Marina"),
                value("Palm Jumeirah"),
                value("18.5"),
                value("2026-12-01"),
                value("09:05"),
                value(""),
            ],
            vec![ConfirmationResponse::Confirm],
        );

        let result = FormEngine::new(&form).run(&mut interaction).unwrap();
        let FormResult::Completed(updates) = result else {
            panic!("form should complete");
        };
        assert!(updates.contains(&DraftUpdate::Name("Noor Saleh".into())));
        assert!(updates.contains(&DraftUpdate::Date(NaiveDate::from_ymd_opt(2026, 12, 1))));
        assert!(updates.contains(&DraftUpdate::Time(NaiveTime::from_hms_opt(9, 5, 0))));
        assert!(updates.contains(&DraftUpdate::Dropoff("Palm Jumeirah".into())));
        assert!(updates.contains(&DraftUpdate::Distance(18.5)));
        assert!(updates.contains(&DraftUpdate::Notes(String::new())));
    }

    #[test]
    fn invalid_values_are_asked_again() {
        let form = DetailsForm::new(FlowVariant::Scheduled, &empty_draft());
        let mut interaction = MockInteraction::new(
            vec![
                value("   "),
                value("Noor"),
                value("n@example.com"),
                value("050"),
                PromptResponse::Keep,
                PromptResponse::Keep,
                value("abc"),
                value("30"),
                value("01/12/2026"),
                value("2026-12-01"),
                value("25:00"),
                value("23:59"),
                value(""),
            ],
            vec![ConfirmationResponse::Confirm],
        );
        let result = FormEngine::new(&form).run(&mut interaction).unwrap();
        assert!(matches!(result, FormResult::Completed(_)));
        assert!(interaction.prompts.is_empty());
    }

    #[test]
    fn back_then_cancel_leaves_nothing_committed() {
        let form = CardForm::new();
        let mut interaction = MockInteraction::new(
            vec![value("Sara Khan"), PromptResponse::Back, PromptResponse::Cancel],
            Vec::new(),
        );
        let result = FormEngine::new(&form).run(&mut interaction).unwrap();
        assert_eq!(result, FormResult::Cancelled);
        assert_eq!(
            interaction.seen_defaults,
            vec![None, None, Some("Sara Khan".into())]
        );
    }

    #[test]
    fn scheduled_form_asks_for_route_and_schedule() {
        let form = DetailsForm::new(FlowVariant::Scheduled, &empty_draft());
        let keys: Vec<_> = form.descriptor().fields.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "name", "email", "phone", "pickup", "dropoff", "distance", "date", "time",
                "notes"
            ]
        );
        assert_eq!(form.defaults().get("distance").map(String::as_str), Some("25"));
        assert_eq!(
            form.defaults().get("pickup").map(String::as_str),
            Some("Dubai Marina")
        );
    }

    #[test]
    fn fixed_route_form_keeps_the_demo_route() {
        let form = DetailsForm::new(FlowVariant::FixedRoute, &empty_draft());
        let keys: Vec<_> = form.descriptor().fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["name", "email", "phone", "notes"]);

        let mut interaction = MockInteraction::new(
            vec![value("Noor"), value("noor@example.com"), value("050"), value("")],
            vec![ConfirmationResponse::Confirm],
        );
        let FormResult::Completed(updates) = FormEngine::new(&form).run(&mut interaction).unwrap()
        else {
            panic!("form should complete");
        };
        assert!(!updates.iter().any(|update| matches!(
            update,
            DraftUpdate::Pickup(_) | DraftUpdate::Dropoff(_) | DraftUpdate::Distance(_)
        )));

        let draft = empty_draft().apply_all(updates);
        assert_eq!(draft.route().distance_km, 25.0);
        assert_eq!(draft.date(), None);
    }

    #[test]
    fn card_form_commits_every_field() {
        let form = CardForm::new();
        let mut interaction = MockInteraction::new(
            vec![
                value("Sara Khan"),
                value("4111 1111 1111 1111"),
                value("12/29"),
                value("123"),
            ],
            vec![ConfirmationResponse::Back, ConfirmationResponse::Confirm],
        );
        interaction.prompts.insert(4, PromptResponse::Keep);

        let result = FormEngine::new(&form).run(&mut interaction).unwrap();
        let FormResult::Completed(values) = result else {
            panic!("form should complete");
        };
        assert_eq!(values[1], (CardField::Number, "4111 1111 1111 1111".into()));
        assert_eq!(values[3], (CardField::Cvc, "123".into()));
    }
}
