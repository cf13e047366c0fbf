use tracing::debug;

use crate::{error::PipelineError, geodesy::{distance, Coordinate, MILES_PER_DEGREE}};

/// Default lattice spacing in degrees.
pub const DEFAULT_STEP_DEGREES: f64 = 0.01;

/// Lattice points inside the disc. Unique by construction.
pub type SampleSet = Vec<Coordinate>;

/// Half-spans (lat, lon) in degrees of the box bounding a disc of `radius_miles` around `center`.
pub fn bounding_half_spans(center: Coordinate, radius_miles: f64) -> (f64, f64) {
    let lat_span = radius_miles / MILES_PER_DEGREE;
    let lon_span = radius_miles / (center.lat.to_radians().cos() * MILES_PER_DEGREE);
    (lat_span, lon_span)
}

/// Enumerate lattice points spaced `step_degrees` apart over the bounding box of the disc,
/// keeping those within `radius_miles` of `center`. Both upper bounds are inclusive.
///
/// A non-positive radius yields exactly the center point, as does a disc too small
/// to hold any lattice point.
pub fn sample(center: Coordinate, radius_miles: f64, step_degrees: f64) -> Result<SampleSet, PipelineError> {
    if !(step_degrees.is_finite() && step_degrees > 0.0) {
        return Err(PipelineError::InvalidStep(step_degrees));
    }
    // Poles make the longitude span unbounded.
    if !(center.lat.abs() < 90.0 && center.lon.is_finite()) {
        return Err(PipelineError::InvalidCenter(center));
    }

    if !(radius_miles > 0.0) { return Ok(vec![center]) }

    let (lat_span, lon_span) = bounding_half_spans(center, radius_miles);
    let (lat_min, lat_max) = (center.lat - lat_span, center.lat + lat_span);
    let (lon_min, lon_max) = (center.lon - lon_span, center.lon + lon_span);

    // Index-based stepping so rounding error doesn't accumulate along a row.
    let lattice = |min: f64, max: f64| (0..)
        .map(move |i| min + i as f64 * step_degrees)
        .take_while(move |v| *v <= max);

    let mut points = Vec::new();
    for lat in lattice(lat_min, lat_max) {
        for lon in lattice(lon_min, lon_max) {
            let point = Coordinate::new(lat, lon);
            if distance(center, point) <= radius_miles { points.push(point) }
        }
    }

    debug!(lat_span, lon_span, kept = points.len(), "sampled lattice");

    // The center is always inside the disc.
    if points.is_empty() { points.push(center) }
    Ok(points)
}
