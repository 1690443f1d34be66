use serde::{Deserialize, Serialize};

use super::draft::BookingDraft;

/// Which shape of the details form is in use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlowVariant {
    /// Customer supplies a pickup date and time.
    #[default]
    Scheduled,
    /// Demo route with a fixed distance and no schedule.
    FixedRoute,
}

impl FlowVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowVariant::Scheduled => "scheduled",
            FlowVariant::FixedRoute => "fixed-route",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Some(FlowVariant::Scheduled),
            "fixed-route" | "fixed" => Some(FlowVariant::FixedRoute),
            _ => None,
        }
    }
}

/// Draft fields that can block submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Vehicle,
    Name,
    Email,
    Phone,
    Date,
    Time,
    Distance,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Vehicle => "vehicle",
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::Distance => "distance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { missing_fields: Vec<DraftField> },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn missing_fields(&self) -> &[DraftField] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid { missing_fields } => missing_fields,
        }
    }
}

/// Checks a draft for submission. Every missing field is reported at once.
///
/// Only presence is checked; email and phone formats are accepted as typed.
pub fn validate(draft: &BookingDraft, variant: FlowVariant) -> ValidationOutcome {
    let mut missing = Vec::new();
    let contact = draft.contact();

    if draft.vehicle().is_none() {
        missing.push(DraftField::Vehicle);
    }
    for (field, value) in [
        (DraftField::Name, &contact.name),
        (DraftField::Email, &contact.email),
        (DraftField::Phone, &contact.phone),
    ] {
        if value.trim().is_empty() {
            missing.push(field);
        }
    }

    match variant {
        FlowVariant::Scheduled => {
            if draft.date().is_none() {
                missing.push(DraftField::Date);
            }
            if draft.time().is_none() {
                missing.push(DraftField::Time);
            }
        }
        FlowVariant::FixedRoute => {
            if draft.route().distance_km <= 0.0 {
                missing.push(DraftField::Distance);
            }
        }
    }

    if missing.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid {
            missing_fields: missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{DraftUpdate, RouteInfo};
    use crate::catalog::Catalog;
    use chrono::{NaiveDate, NaiveTime};

    fn complete_draft() -> BookingDraft {
        let vehicle = Catalog::builtin().find("bmw-7").cloned().unwrap();
        BookingDraft::start(vehicle, RouteInfo::new("Downtown", "DXB", 18.0)).apply_all([
            DraftUpdate::Name("Omar Saleh".into()),
            DraftUpdate::Email("omar@example.com".into()),
            DraftUpdate::Phone("+971 55 123 4567".into()),
            DraftUpdate::Date(NaiveDate::from_ymd_opt(2026, 11, 2)),
            DraftUpdate::Time(NaiveTime::from_hms_opt(9, 30, 0)),
        ])
    }

    #[test]
    fn complete_draft_is_valid_in_both_variants() {
        let draft = complete_draft();
        assert!(validate(&draft, FlowVariant::Scheduled).is_valid());
        assert!(validate(&draft, FlowVariant::FixedRoute).is_valid());
    }

    #[test]
    fn empty_name_is_the_only_missing_field() {
        let draft = complete_draft().apply(DraftUpdate::Name(String::new()));
        let outcome = validate(&draft, FlowVariant::Scheduled);
        assert_eq!(outcome.missing_fields(), &[DraftField::Name]);
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let draft = complete_draft()
            .apply(DraftUpdate::Email("   ".into()))
            .apply(DraftUpdate::Phone("\t".into()));
        let outcome = validate(&draft, FlowVariant::Scheduled);
        assert_eq!(
            outcome.missing_fields(),
            &[DraftField::Email, DraftField::Phone]
        );
    }

    #[test]
    fn variant_decides_schedule_or_distance() {
        let draft = complete_draft()
            .apply(DraftUpdate::Date(None))
            .apply(DraftUpdate::Time(None))
            .apply(DraftUpdate::Distance(0.0));

        assert_eq!(
            validate(&draft, FlowVariant::Scheduled).missing_fields(),
            &[DraftField::Date, DraftField::Time]
        );
        assert_eq!(
            validate(&draft, FlowVariant::FixedRoute).missing_fields(),
            &[DraftField::Distance]
        );
    }

    #[test]
    fn malformed_email_is_not_rejected() {
        let draft = complete_draft().apply(DraftUpdate::Email("not-an-email".into()));
        assert!(validate(&draft, FlowVariant::Scheduled).is_valid());
    }

    #[test]
    fn variant_parses_config_values() {
        assert_eq!(FlowVariant::parse("Fixed-Route"), Some(FlowVariant::FixedRoute));
        assert_eq!(FlowVariant::parse("scheduled"), Some(FlowVariant::Scheduled));
        assert_eq!(FlowVariant::parse("later"), None);
    }
}
