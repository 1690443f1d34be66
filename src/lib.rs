#![doc(test(attr(deny(warnings))))]

//! Chauffeur Core drives a luxury chauffeur booking: vehicle and route
//! selection, passenger details, payment method selection and confirmation.
//! The `chauffeur_cli` binary puts a terminal front end on top of it.

pub mod booking;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod flow;
pub mod payment;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Chauffeur Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
