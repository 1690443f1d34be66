use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("AED")
    }
}

/// Placeholder shown when no price can be derived.
pub const PRICE_PLACEHOLDER: &str = "--";

pub fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        "BHD" | "KWD" | "OMR" => 3,
        _ => 2,
    }
}

/// Formats a number with thousands grouping, e.g. `12345.5` → `12,345.50`.
pub fn format_number(value: f64, precision: usize) -> String {
    let rendered = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), Some(fraction.to_string())),
        None => (rendered.clone(), None),
    };

    let mut grouped = String::new();
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut body = grouped;
    if let Some(fraction) = fraction {
        body.push('.');
        body.push_str(&fraction);
    }
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Renders a price such as `AED 125.00`.
///
/// Missing or non-finite amounts render as a placeholder instead of `NaN`.
pub fn format_price(amount: Option<f64>, code: &CurrencyCode) -> String {
    match amount.filter(|value| value.is_finite()) {
        Some(value) => format!(
            "{} {}",
            code.as_str(),
            format_number(value, minor_units_for(code.as_str()))
        ),
        None => format!("{} {}", code.as_str(), PRICE_PLACEHOLDER),
    }
}
