use crate::utils::constants::EARTH_RADIUS_MILES;

/// Great-circle distance in miles between two points given in decimal degrees
///
/// Uses the haversine formula on a sphere of radius 3958.8 miles. Inputs are
/// not range-checked; NaN inputs yield NaN.
///
/// # Examples
/// ```
/// use aqs_zip_matcher::utils::haversine_miles;
///
/// let d = haversine_miles(40.4450, -79.9520, 40.4440, -79.9530);
/// assert!(d > 0.0 && d < 0.1);
/// ```
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let lat2_rad = lat2.to_radians();
    let lon2_rad = lon2.to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Parse a decimal-degree cell, yielding NaN for empty or malformed values
///
/// Bad coordinates are carried through the distance formula rather than
/// rejected, so a row is never dropped because of them.
pub fn parse_coordinate_lenient(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Check that a latitude/longitude pair lies within geographic bounds
pub fn is_valid_position(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}
