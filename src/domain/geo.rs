use crate::domain::model::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Cache key for a place-name query: trimmed and lower-cased.
pub fn normalize_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Great-circle distance in kilometres, rounded to 2 decimal places.
pub fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = ((d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to(EARTH_RADIUS_KM * c, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
