//! Geodesic helpers: coordinate formatting/parsing and great-circle
//! distance. Pure functions, no state.

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Display text for a coordinate that has not been acquired yet.
pub const UNSET_COORDINATE: &str = "-";

/// Decimal places used for coordinate display.
pub const COORDINATE_PLACES: usize = 4;

/// Fixed-point decimal formatting at the standard precision.
/// Never fails for finite input.
pub fn format_coordinate(value: f64) -> String {
    format_coordinate_places(value, COORDINATE_PLACES)
}

pub fn format_coordinate_places(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Parse a coordinate from display text.
/// Returns `None` for the unset sentinel, non-numeric text or a
/// non-finite value; never panics.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() || t == UNSET_COORDINATE {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// lat ∈ [-90, 90] and lon ∈ [-180, 180]. NaN fails both ranges.
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Great-circle distance in meters between two points, haversine formula.
/// Symmetric, zero for identical points.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_roundtrip() {
        for &v in &[0.0, 45.1234, -89.9999, 13.405, 179.9999, -0.0001] {
            let text = format_coordinate(v);
            let back = parse_coordinate(&text).expect("parse back");
            assert!((back - v).abs() < 0.5e-4, "{} -> {} -> {}", v, text, back);
        }
    }

    #[test]
    fn parse_rejects_sentinel_and_garbage() {
        assert_eq!(parse_coordinate(UNSET_COORDINATE), None);
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("  "), None);
        assert_eq!(parse_coordinate("north"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
        assert_eq!(parse_coordinate(" 52.52 "), Some(52.52));
    }

    #[test]
    fn distance_zero_for_identical_points() {
        assert_eq!(distance_meters(52.52, 13.405, 52.52, 13.405), 0.0);
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let d1 = distance_meters(52.5200, 13.4050, 48.8566, 2.3522);
        let d2 = distance_meters(48.8566, 2.3522, 52.5200, 13.4050);
        assert_eq!(d1, d2);
    }

    #[test]
    fn distance_short_berlin_segment() {
        // Reference haversine value ≈ 97.8 m
        let d = distance_meters(52.5200, 13.4050, 52.5190, 13.4060);
        assert!((97.0..99.0).contains(&d), "got {}", d);
    }

    #[test]
    fn distance_one_degree_on_equator() {
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    #[test]
    fn validate_ranges() {
        assert!(validate_coordinates(0.0, 0.0));
        assert!(validate_coordinates(-90.0, 180.0));
        assert!(validate_coordinates(90.0, -180.0));
        assert!(!validate_coordinates(90.01, 0.0));
        assert!(!validate_coordinates(0.0, -180.5));
        assert!(!validate_coordinates(f64::NAN, 0.0));
    }
}
