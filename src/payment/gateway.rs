use std::{thread, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::method::PaymentMethod;

/// What the payment screen submits to a gateway.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentIntent {
    pub booking_id: Uuid,
    pub method: PaymentMethod,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub method: PaymentMethod,
    pub amount: f64,
    pub currency: String,
    pub processed_at: DateTime<Utc>,
}

/// Reason a gateway refused or failed to process a payment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayFailure {
    #[error("card declined: {0}")]
    Declined(String),
    #[error("gateway timed out")]
    Timeout,
}

/// Contract for anything that can settle a booking payment.
pub trait PaymentGateway {
    fn process(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, GatewayFailure>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Approve,
    Decline(String),
    Timeout,
}

/// Stand-in gateway: waits a fixed delay, then answers with a canned outcome.
///
/// The wait blocks the caller and cannot be interrupted.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Approve,
        }
    }

    pub fn declining(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Decline(reason.into()),
        }
    }

    /// Waits out the delay and then reports that the gateway never answered.
    pub fn timing_out(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Timeout,
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl PaymentGateway for SimulatedGateway {
    fn process(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, GatewayFailure> {
        tracing::info!(
            booking = %intent.booking_id,
            method = %intent.method,
            last4 = intent.card_last4.as_deref().unwrap_or("-"),
            delay_ms = self.delay.as_millis() as u64,
            "processing simulated payment"
        );
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match &self.outcome {
            SimulatedOutcome::Approve => Ok(PaymentReceipt {
                transaction_id: Uuid::new_v4(),
                method: intent.method,
                amount: intent.amount,
                currency: intent.currency.clone(),
                processed_at: Utc::now(),
            }),
            SimulatedOutcome::Decline(reason) => Err(GatewayFailure::Declined(reason.clone())),
            SimulatedOutcome::Timeout => Err(GatewayFailure::Timeout),
        }
    }
}
