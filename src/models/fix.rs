use crate::core::geo;
use serde::Serialize;

/// A single resolved location reading, in decimal degrees.
/// Constructible only from an in-range coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if geo::validate_coordinates(latitude, longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    /// Parse a `"lat,lon"` pair as typed by the user or passed on the CLI.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat_str, lon_str) = text.split_once(',')?;
        let lat = geo::parse_coordinate(lat_str)?;
        let lon = geo::parse_coordinate(lon_str)?;
        Self::new(lat, lon)
    }

    /// Display form: both coordinates at the standard precision.
    pub fn display(&self) -> String {
        format!(
            "{}, {}",
            geo::format_coordinate(self.latitude),
            geo::format_coordinate(self.longitude)
        )
    }
}
