use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    aggregate::aggregate,
    census::{BlockLocator, StatsSource, DEFAULT_ATTRIBUTE},
    error::PipelineError,
    geodesy::Coordinate,
    resolve::deduplicate,
    retry::RetryPolicy,
    sample::{sample, DEFAULT_STEP_DEGREES},
};

/// Default center point (Boise, ID).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(43.528484, -116.147614);

/// Default radius in miles.
pub const DEFAULT_RADIUS_MILES: f64 = 2.03;

/// Inputs of one estimate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    pub center: Coordinate,
    pub radius_miles: f64,
    pub step_degrees: f64,
    /// Statistics attribute summed over the blocks.
    pub attribute: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            radius_miles: DEFAULT_RADIUS_MILES,
            step_degrees: DEFAULT_STEP_DEGREES,
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            api_key: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub center: Coordinate,
    pub radius_miles: f64,
    /// Number of lattice points inside the disc.
    pub samples: usize,
    /// Number of distinct blocks those points fell in.
    pub blocks: usize,
    pub population: u64,
}

/// Runs sample -> deduplicate -> aggregate against a pair of collaborators.
pub struct Pipeline<L, S> {
    config: EstimateConfig,
    locator: L,
    stats: S,
}

impl<L: BlockLocator, S: StatsSource> Pipeline<L, S> {
    pub fn new(config: EstimateConfig, locator: L, stats: S) -> Self {
        Self { config, locator, stats }
    }

    #[inline] pub fn config(&self) -> &EstimateConfig { &self.config }

    /// Run every stage. Any stage error is returned as is; no partial total is produced.
    pub fn run(&self) -> Result<Report, PipelineError> {
        let EstimateConfig { center, radius_miles, step_degrees, attribute, api_key, retry } = &self.config;

        info!(%center, radius_miles, step_degrees, "sampling");
        let samples = sample(*center, *radius_miles, *step_degrees)?;
        info!(samples = samples.len(), "sampled points");

        let blocks = deduplicate(&self.locator, &samples, retry)?;

        let population = aggregate(&self.stats, blocks.iter(), attribute, api_key.as_deref(), retry)?;

        Ok(Report {
            center: *center,
            radius_miles: *radius_miles,
            samples: samples.len(),
            blocks: blocks.len(),
            population,
        })
    }
}
