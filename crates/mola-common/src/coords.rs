//! Geographic and pixel coordinate types.

use serde::{Deserialize, Serialize};

/// Lowest valid latitude in degrees.
pub const LAT_MIN: f64 = -90.0;
/// Highest valid latitude in degrees.
pub const LAT_MAX: f64 = 90.0;
/// Longitudes live in `[0, LON_PERIOD)`.
pub const LON_PERIOD: f64 = 360.0;

/// A point on the planet surface.
///
/// Latitude is in degrees north `[-90, 90]`, longitude in degrees east
/// `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    /// Create a coordinate. Out-of-range values are a caller bug.
    pub fn new(lat: f64, lon: f64) -> Self {
        debug_assert!(
            (LAT_MIN..=LAT_MAX).contains(&lat),
            "latitude {lat} outside [-90, 90]"
        );
        debug_assert!(
            (0.0..LON_PERIOD).contains(&lon),
            "longitude {lon} outside [0, 360)"
        );
        Self { lat, lon }
    }

    /// Whether the coordinate lies in the valid domain.
    pub fn is_valid(&self) -> bool {
        (LAT_MIN..=LAT_MAX).contains(&self.lat) && (0.0..LON_PERIOD).contains(&self.lon)
    }
}

/// Wrap any finite longitude into `[0, 360)`.
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(LON_PERIOD);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= LON_PERIOD {
        0.0
    } else {
        wrapped
    }
}

/// An integer pixel position inside an image of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoordinate {
    pub x: u32,
    pub y: u32,
}

impl PixelCoordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Whether the pixel lies inside a `width` x `height` image.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}
