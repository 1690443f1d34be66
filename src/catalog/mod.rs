//! Static vehicle catalog shipped with the application.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Bumped whenever the compiled-in fleet changes.
pub const CATALOG_VERSION: u32 = 1;

/// Vehicle classes offered by the fleet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleCategory {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Luxury,
}

impl VehicleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "Sedan",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Luxury => "Luxury",
        }
    }
}

/// A bookable vehicle with its rates and amenities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub category: VehicleCategory,
    pub capacity: u32,
    pub price_per_km: f64,
    pub price_per_hour: f64,
    pub features: Vec<String>,
    pub image_url: String,
}

impl Vehicle {
    fn fleet_entry(
        id: &str,
        name: &str,
        category: VehicleCategory,
        capacity: u32,
        rates: (f64, f64),
        features: &[&str],
        image_url: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            capacity,
            price_per_km: rates.0,
            price_per_hour: rates.1,
            features: features.iter().map(|feature| feature.to_string()).collect(),
            image_url: image_url.into(),
        }
    }
}

/// Ordered, read-only vehicle list.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// The fleet compiled into the binary.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        let needle = id.trim();
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id.eq_ignore_ascii_case(needle))
    }

    /// Resolves either a vehicle id or a 1-based list position.
    pub fn resolve(&self, key: &str) -> Option<&Vehicle> {
        if let Ok(position) = key.trim().parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.vehicles.get(index));
        }
        self.find(key)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(vec![
        Vehicle::fleet_entry(
            "mercedes-s-class",
            "Mercedes-Benz S-Class",
            VehicleCategory::Sedan,
            3,
            (5.0, 250.0),
            &[
                "Premium leather interior",
                "Climate control",
                "Privacy glass",
                "Wi-Fi connectivity",
                "Refreshments",
            ],
            "https://images.unsplash.com/photo-1626668893632-6f3a4466d22f?auto=format&fit=crop&q=80",
        ),
        Vehicle::fleet_entry(
            "bmw-7",
            "BMW 7 Series",
            VehicleCategory::Sedan,
            3,
            (4.5, 230.0),
            &[
                "Executive seating",
                "Ambient lighting",
                "Entertainment system",
                "USB charging",
                "Bottled water",
            ],
            "https://images.unsplash.com/photo-1556189250-72ba954cfc2b?auto=format&fit=crop&q=80",
        ),
        Vehicle::fleet_entry(
            "range-rover",
            "Range Rover Autobiography",
            VehicleCategory::Suv,
            5,
            (6.0, 300.0),
            &[
                "Panoramic roof",
                "Premium sound system",
                "Extended legroom",
                "Wireless charging",
                "Premium refreshments",
            ],
            "https://cdn-nexlink.s3.us-east-2.amazonaws.com/20220705111314_Range-Rover-1_3dc6571e-fcb4-4695-8e43-686dd8ddd15a.jpg",
        ),
        Vehicle::fleet_entry(
            "mercedes-v",
            "Mercedes-Benz V-Class",
            VehicleCategory::Luxury,
            7,
            (7.0, 350.0),
            &[
                "Conference seating",
                "Built-in tables",
                "Premium entertainment",
                "Executive comfort",
                "Mini refrigerator",
            ],
            "https://images.unsplash.com/photo-1617469767053-d3b523a0b982?auto=format&fit=crop&q=80",
        ),
    ])
});
