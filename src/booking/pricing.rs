use crate::catalog::Vehicle;

/// Estimated transfer price: distance multiplied by the per-kilometre rate.
///
/// No rounding happens here; display code formats to two decimals.
pub fn compute_price(distance_km: f64, vehicle: &Vehicle) -> f64 {
    distance_km * vehicle.price_per_km
}

/// Hourly hire price for the chauffeur-by-the-hour booking type.
pub fn compute_hourly_price(hours: f64, vehicle: &Vehicle) -> f64 {
    hours * vehicle.price_per_hour
}

/// Parses a user-entered distance, mapping anything unusable to zero.
pub fn parse_distance(raw: &str) -> f64 {
    sanitize_quantity(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Clamps non-finite or negative quantities to zero so they never reach a price.
pub fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
