#![doc = "Census population within a radius: grid sampling, block lookup and aggregation"]
mod aggregate;
mod error;
mod geodesy;
mod pipeline;
mod resolve;
mod retry;
mod sample;
mod types;

pub mod census;

#[doc(inline)]
pub use geodesy::{distance, Coordinate, EARTH_RADIUS_MILES, MILES_PER_DEGREE};

#[doc(inline)]
pub use sample::{bounding_half_spans, sample, SampleSet, DEFAULT_STEP_DEGREES};

#[doc(inline)]
pub use types::{BlockId, BlockParts, GeoType};

#[doc(inline)]
pub use resolve::{deduplicate, resolve, BlockSet};

#[doc(inline)]
pub use aggregate::{aggregate, block_value};

#[doc(inline)]
pub use pipeline::{EstimateConfig, Pipeline, Report, DEFAULT_CENTER, DEFAULT_RADIUS_MILES};

#[doc(inline)]
pub use retry::{Exhausted, RetryPolicy};

#[doc(inline)]
pub use error::{LookupError, PipelineError};
