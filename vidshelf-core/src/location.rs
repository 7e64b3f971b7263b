//! Geographic coordinates attached to a saved clip.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Returns the location for a raw coordinate pair, or `None` when the
    /// pair carries no usable fix.
    ///
    /// Camera layers report "no fix" as zero, so a location is kept only
    /// when both coordinates are non-zero. Non-finite values are dropped too.
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if latitude == 0.0 || longitude == 0.0 {
            return None;
        }
        Some(Self { latitude, longitude })
    }
}
