use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment options offered on the payment screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Visa,
    Mastercard,
    Amex,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Visa,
        PaymentMethod::Mastercard,
        PaymentMethod::Amex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Visa => "visa",
            PaymentMethod::Mastercard => "mastercard",
            PaymentMethod::Amex => "amex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash on arrival",
            PaymentMethod::Visa => "Visa",
            PaymentMethod::Mastercard => "Mastercard",
            PaymentMethod::Amex => "American Express",
        }
    }

    pub fn requires_card(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "cash" | "cash-on-arrival" => Some(PaymentMethod::Cash),
            "visa" => Some(PaymentMethod::Visa),
            "mastercard" | "master" | "mc" => Some(PaymentMethod::Mastercard),
            "amex" | "american-express" => Some(PaymentMethod::Amex),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cash_skips_card_form() {
        let card_methods: Vec<_> = PaymentMethod::ALL
            .iter()
            .filter(|method| method.requires_card())
            .collect();
        assert_eq!(card_methods.len(), 3);
        assert!(!PaymentMethod::Cash.requires_card());
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(PaymentMethod::parse(" VISA "), Some(PaymentMethod::Visa));
        assert_eq!(PaymentMethod::parse("mc"), Some(PaymentMethod::Mastercard));
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
    }
}
