use thiserror::Error;

use crate::{geodesy::Coordinate, types::BlockId};

/// Failure of a single call to an external service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Transport-level failure (connect, timeout, truncated body).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Terminal failure of an estimate run. No partial total accompanies these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("grid step must be a positive number of degrees, got {0}")]
    InvalidStep(f64),

    #[error("center {0} must have a latitude strictly between -90 and 90 and a finite longitude")]
    InvalidCenter(Coordinate),

    #[error("could not resolve block for point {point} after {attempts} attempt(s)")]
    Resolution {
        point: Coordinate,
        attempts: u32,
        #[source]
        source: LookupError,
    },

    #[error("could not fetch population for block {block} after {attempts} attempt(s)")]
    Aggregation {
        block: BlockId,
        attempts: u32,
        #[source]
        source: LookupError,
    },
}
