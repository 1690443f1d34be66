//! Booking draft, pricing, submission checks and the step wizard.

pub mod draft;
pub mod pricing;
pub mod validation;
pub mod wizard;

pub use draft::{BookingDraft, BookingType, ContactInfo, DraftUpdate, RouteInfo};
pub use pricing::{compute_hourly_price, compute_price, parse_distance};
pub use validation::{validate, DraftField, FlowVariant, ValidationOutcome};
pub use wizard::{StepIndicator, StepWizard, WizardStep};
