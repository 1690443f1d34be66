//! Payment method selection, card entry masks and the gateway contract.

pub mod card;
pub mod formatters;
pub mod gateway;
pub mod method;
pub mod selector;

pub use card::{CardDetails, CardField};
pub use formatters::{format_card_number, format_cvc, format_expiry};
pub use gateway::{
    GatewayFailure, PaymentGateway, PaymentIntent, PaymentReceipt, SimulatedGateway,
    SimulatedOutcome,
};
pub use method::PaymentMethod;
pub use selector::{PaymentOrder, PaymentSelector, PaymentState};
