use serde::{Deserialize, Serialize};

use super::formatters::{format_card_number, format_cvc, format_expiry};
use crate::errors::{BookingError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardField {
    Holder,
    Number,
    Expiry,
    Cvc,
}

impl CardField {
    pub const ALL: [CardField; 4] = [
        CardField::Holder,
        CardField::Number,
        CardField::Expiry,
        CardField::Cvc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::Holder => "holder",
            CardField::Number => "number",
            CardField::Expiry => "expiry",
            CardField::Cvc => "cvc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "holder" | "name" => Some(CardField::Holder),
            "number" => Some(CardField::Number),
            "expiry" | "exp" => Some(CardField::Expiry),
            "cvc" | "cvv" => Some(CardField::Cvc),
            _ => None,
        }
    }

    /// Mask applied to raw keystrokes for this field.
    pub fn format(&self, raw: &str) -> String {
        match self {
            CardField::Holder => raw.to_string(),
            CardField::Number => format_card_number(raw),
            CardField::Expiry => format_expiry(raw),
            CardField::Cvc => format_cvc(raw),
        }
    }
}

/// Raw card form values. Every update is re-masked from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    holder: String,
    number: String,
    expiry: String,
    cvc: String,
}

impl CardDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, field: CardField, raw: &str) {
        let formatted = field.format(raw);
        match field {
            CardField::Holder => self.holder = formatted,
            CardField::Number => self.number = formatted,
            CardField::Expiry => self.expiry = formatted,
            CardField::Cvc => self.cvc = formatted,
        }
    }

    pub fn value(&self, field: CardField) -> &str {
        match field {
            CardField::Holder => &self.holder,
            CardField::Number => &self.number,
            CardField::Expiry => &self.expiry,
            CardField::Cvc => &self.cvc,
        }
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Last four digits, the only card data that may be logged or shown.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }

    pub fn validate(&self) -> Result<()> {
        let mut invalid = Vec::new();
        if self.holder.trim().is_empty() {
            invalid.push(CardField::Holder);
        }
        let digits = self.number.chars().filter(|c| c.is_ascii_digit()).count();
        if !(15..=16).contains(&digits) {
            invalid.push(CardField::Number);
        }
        if !is_valid_expiry(&self.expiry) {
            invalid.push(CardField::Expiry);
        }
        if self.cvc.len() != 3 || !self.cvc.chars().all(|c| c.is_ascii_digit()) {
            invalid.push(CardField::Cvc);
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(BookingError::InvalidCard(invalid))
        }
    }
}

fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    let month_ok = month
        .parse::<u8>()
        .map(|m| (1..=12).contains(&m))
        .unwrap_or(false);
    month_ok && year.len() == 2 && year.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_card() -> CardDetails {
        let mut card = CardDetails::new();
        card.update(CardField::Holder, "Mariam Al Nuaimi");
        card.update(CardField::Number, "4111111111111111");
        card.update(CardField::Expiry, "1229");
        card.update(CardField::Cvc, "123");
        card
    }

    #[test]
    fn updates_apply_field_masks() {
        let card = filled_card();
        assert_eq!(card.value(CardField::Number), "4111 1111 1111 1111");
        assert_eq!(card.value(CardField::Expiry), "12/29");
        assert_eq!(card.last4(), "1111");
    }

    #[test]
    fn filled_card_validates() {
        assert!(filled_card().validate().is_ok());
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let mut card = filled_card();
        card.update(CardField::Holder, " ");
        card.update(CardField::Expiry, "1329");
        card.update(CardField::Cvc, "12");
        match card.validate() {
            Err(BookingError::InvalidCard(fields)) => assert_eq!(
                fields,
                vec![CardField::Holder, CardField::Expiry, CardField::Cvc]
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn short_number_is_rejected() {
        let mut card = filled_card();
        card.update(CardField::Number, "4111 1111");
        assert!(matches!(
            card.validate(),
            Err(BookingError::InvalidCard(fields)) if fields == vec![CardField::Number]
        ));
    }
}
