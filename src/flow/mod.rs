//! Screen navigation and the session that carries a booking through it.

pub mod navigation;
pub mod session;

pub use navigation::{Carried, Landing, Navigator, Screen};
pub use session::{BookingFlow, ConfirmedBooking, FlowSettings};
