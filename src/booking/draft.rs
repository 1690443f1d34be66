use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pricing::{compute_hourly_price, compute_price, sanitize_quantity};
use crate::catalog::Vehicle;
use crate::payment::PaymentMethod;

/// Pickup and drop-off labels plus the distance used for pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RouteInfo {
    pub pickup: String,
    pub dropoff: String,
    pub distance_km: f64,
}

impl RouteInfo {
    pub fn new(pickup: impl Into<String>, dropoff: impl Into<String>, distance_km: f64) -> Self {
        Self {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
            distance_km: sanitize_quantity(distance_km),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Point-to-point transfer or chauffeur hire by the hour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BookingType {
    #[default]
    Transfer,
    Hourly {
        hours: f64,
    },
}

/// One typed update per editable draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftUpdate {
    Vehicle(Vehicle),
    Name(String),
    Email(String),
    Phone(String),
    Notes(String),
    Pickup(String),
    Dropoff(String),
    Distance(f64),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    BookingType(BookingType),
}

/// Choices accumulated while moving through the booking screens.
///
/// Drafts are values: every update consumes the draft and hands back the
/// updated copy, and the derived price is recomputed on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    id: Uuid,
    vehicle: Option<Vehicle>,
    contact: ContactInfo,
    route: RouteInfo,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    booking_type: BookingType,
    price: Option<f64>,
    payment_method: Option<PaymentMethod>,
    created_at: DateTime<Utc>,
}

impl BookingDraft {
    pub fn new(route: RouteInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle: None,
            contact: ContactInfo::default(),
            route,
            date: None,
            time: None,
            booking_type: BookingType::Transfer,
            price: None,
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    /// Starts a draft the moment a vehicle is first picked.
    pub fn start(vehicle: Vehicle, route: RouteInfo) -> Self {
        Self::new(route).apply(DraftUpdate::Vehicle(vehicle))
    }

    pub fn apply(mut self, update: DraftUpdate) -> Self {
        match update {
            DraftUpdate::Vehicle(vehicle) => self.vehicle = Some(vehicle),
            DraftUpdate::Name(value) => self.contact.name = value,
            DraftUpdate::Email(value) => self.contact.email = value,
            DraftUpdate::Phone(value) => self.contact.phone = value,
            DraftUpdate::Notes(value) => {
                let trimmed = value.trim();
                self.contact.notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            DraftUpdate::Pickup(value) => self.route.pickup = value,
            DraftUpdate::Dropoff(value) => self.route.dropoff = value,
            DraftUpdate::Distance(km) => self.route.distance_km = sanitize_quantity(km),
            DraftUpdate::Date(date) => self.date = date,
            DraftUpdate::Time(time) => self.time = time,
            DraftUpdate::BookingType(kind) => {
                self.booking_type = match kind {
                    BookingType::Hourly { hours } => BookingType::Hourly {
                        hours: sanitize_quantity(hours),
                    },
                    BookingType::Transfer => BookingType::Transfer,
                }
            }
        }
        self.reprice();
        self
    }

    pub fn apply_all(self, updates: impl IntoIterator<Item = DraftUpdate>) -> Self {
        updates.into_iter().fold(self, BookingDraft::apply)
    }

    /// Payment is the only field the payment step may add.
    pub(crate) fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    fn reprice(&mut self) {
        self.price = self.vehicle.as_ref().map(|vehicle| match self.booking_type {
            BookingType::Transfer => compute_price(self.route.distance_km, vehicle),
            BookingType::Hourly { hours } => compute_hourly_price(hours, vehicle),
        });
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn booking_type(&self) -> BookingType {
        self.booking_type
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
