use uuid::Uuid;

use super::card::{CardDetails, CardField};
use super::gateway::{PaymentGateway, PaymentIntent, PaymentReceipt};
use super::method::PaymentMethod;
use crate::errors::{BookingError, Result};

/// Where the payment screen currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentState {
    /// Method list is showing. Carries the reason of the last failed attempt.
    Unselected { last_failure: Option<String> },
    CardForm {
        method: PaymentMethod,
        card: CardDetails,
    },
    CashConfirm,
    Confirmed {
        method: PaymentMethod,
        receipt: PaymentReceipt,
    },
}

impl PaymentState {
    fn describe(&self) -> &'static str {
        match self {
            PaymentState::Unselected { .. } => "no payment method is selected",
            PaymentState::CardForm { .. } => "the card form is open",
            PaymentState::CashConfirm => "cash payment awaits confirmation",
            PaymentState::Confirmed { .. } => "the payment is already confirmed",
        }
    }
}

fn rejection(state: &PaymentState, action: &'static str) -> BookingError {
    BookingError::InvalidTransition {
        state: state.describe(),
        action,
    }
}

impl Default for PaymentState {
    fn default() -> Self {
        PaymentState::Unselected { last_failure: None }
    }
}

/// Amount and reference the gateway is asked to settle.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOrder {
    pub booking_id: Uuid,
    pub amount: f64,
    pub currency: String,
}

/// State machine behind the payment screen.
#[derive(Debug, Clone, Default)]
pub struct PaymentSelector {
    state: PaymentState,
}

impl PaymentSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn last_failure(&self) -> Option<&str> {
        match &self.state {
            PaymentState::Unselected { last_failure } => last_failure.as_deref(),
            _ => None,
        }
    }

    pub fn confirmed(&self) -> Option<(PaymentMethod, &PaymentReceipt)> {
        match &self.state {
            PaymentState::Confirmed { method, receipt } => Some((*method, receipt)),
            _ => None,
        }
    }

    fn reject<T>(&self, action: &'static str) -> Result<T> {
        Err(rejection(&self.state, action))
    }

    /// Cash goes straight to its confirmation; cards open the card form.
    pub fn choose(&mut self, method: PaymentMethod) -> Result<&PaymentState> {
        if !matches!(self.state, PaymentState::Unselected { .. }) {
            return self.reject("choose a payment method");
        }
        self.state = if method.requires_card() {
            PaymentState::CardForm {
                method,
                card: CardDetails::new(),
            }
        } else {
            PaymentState::CashConfirm
        };
        tracing::info!(method = %method, "payment method chosen");
        Ok(&self.state)
    }

    /// Returns to the method list, discarding any card input.
    pub fn back(&mut self) -> Result<()> {
        match self.state {
            PaymentState::CardForm { .. } | PaymentState::CashConfirm => {
                self.state = PaymentState::default();
                Ok(())
            }
            _ => self.reject("go back"),
        }
    }

    pub fn update_card(&mut self, field: CardField, raw: &str) -> Result<&CardDetails> {
        match &mut self.state {
            PaymentState::CardForm { card, .. } => {
                card.update(field, raw);
                Ok(card)
            }
            other => Err(rejection(other, "edit card details")),
        }
    }

    pub fn submit_card(
        &mut self,
        gateway: &dyn PaymentGateway,
        order: &PaymentOrder,
    ) -> Result<PaymentReceipt> {
        let PaymentState::CardForm { method, card } = &self.state else {
            return self.reject("submit card details");
        };
        card.validate()?;
        let intent = PaymentIntent {
            booking_id: order.booking_id,
            method: *method,
            amount: order.amount,
            currency: order.currency.clone(),
            card_last4: Some(card.last4()),
        };
        self.settle(gateway, intent)
    }

    pub fn confirm_cash(
        &mut self,
        gateway: &dyn PaymentGateway,
        order: &PaymentOrder,
    ) -> Result<PaymentReceipt> {
        if !matches!(self.state, PaymentState::CashConfirm) {
            return self.reject("confirm a cash payment");
        }
        let intent = PaymentIntent {
            booking_id: order.booking_id,
            method: PaymentMethod::Cash,
            amount: order.amount,
            currency: order.currency.clone(),
            card_last4: None,
        };
        self.settle(gateway, intent)
    }

    fn settle(
        &mut self,
        gateway: &dyn PaymentGateway,
        intent: PaymentIntent,
    ) -> Result<PaymentReceipt> {
        match gateway.process(&intent) {
            Ok(receipt) => {
                tracing::info!(
                    method = %intent.method,
                    transaction = %receipt.transaction_id,
                    "payment approved"
                );
                self.state = PaymentState::Confirmed {
                    method: intent.method,
                    receipt: receipt.clone(),
                };
                Ok(receipt)
            }
            Err(failure) => {
                let reason = failure.to_string();
                tracing::warn!(method = %intent.method, %reason, "payment failed");
                self.state = PaymentState::Unselected {
                    last_failure: Some(reason.clone()),
                };
                Err(BookingError::PaymentFailed(reason))
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = PaymentState::default();
    }
}
