//! External collaborators: the geocoding lookup and the statistics query.

mod parse;
#[cfg(feature = "http")]
mod client;

pub use parse::{parse_block_response, parse_count_table};
#[cfg(feature = "http")]
pub use client::{CensusClient, GEOCODER_URL, STATS_URL};

use crate::{error::LookupError, geodesy::Coordinate, types::{BlockId, BlockParts}};

/// Default statistics attribute: total population (2020 decennial redistricting file).
pub const DEFAULT_ATTRIBUTE: &str = "P1_001N";

/// Maps a coordinate to the census block containing it.
pub trait BlockLocator {
    fn locate(&self, point: Coordinate) -> Result<BlockId, LookupError>;
}

/// Looks up a single numeric attribute for one census block.
pub trait StatsSource {
    fn query_attribute(&self, block: &BlockParts<'_>, attribute: &str, api_key: Option<&str>) -> Result<u64, LookupError>;
}

impl<F> BlockLocator for F where F: Fn(Coordinate) -> Result<BlockId, LookupError> {
    fn locate(&self, point: Coordinate) -> Result<BlockId, LookupError> { self(point) }
}

impl<F> StatsSource for F where F: Fn(&BlockParts<'_>, &str, Option<&str>) -> Result<u64, LookupError> {
    fn query_attribute(&self, block: &BlockParts<'_>, attribute: &str, api_key: Option<&str>) -> Result<u64, LookupError> {
        self(block, attribute, api_key)
    }
}
