use thiserror::Error;

use crate::booking::DraftField;
use crate::payment::CardField;

/// Error type that captures booking flow failures.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("No booking in progress. Select a vehicle to start a new booking.")]
    MissingContext,
    #[error("Please fill in all required fields: {}", join_labels(.0.iter().map(|f| f.as_str())))]
    MissingFields(Vec<DraftField>),
    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(String),
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    #[error("Invalid card details: {}", join_labels(.0.iter().map(|f| f.as_str())))]
    InvalidCard(Vec<CardField>),
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_every_field() {
        let err = BookingError::MissingFields(vec![DraftField::Name, DraftField::Phone]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: name, phone"
        );
    }
}
