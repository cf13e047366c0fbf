use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Approximate length of one degree of latitude, in miles.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline] pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    /// Great-circle distance to `other` in miles.
    #[inline] pub fn distance_to(&self, other: &Coordinate) -> f64 { distance(*self, *other) }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine distance between `a` and `b` in miles.
/// Inputs are assumed to lie in a small local region (no pole or antimeridian handling).
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Clamp guards against h drifting a hair above 1.0 for near-antipodal inputs.
    2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin()
}
