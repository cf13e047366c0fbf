use std::time::Duration;

use anyhow::{Context, Result};
use censusradius::{census::CensusClient, Coordinate, EstimateConfig, Pipeline, RetryPolicy};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::EstimateArgs) -> Result<()> {
    let area = &args.area;
    let config = EstimateConfig {
        center: Coordinate::new(area.lat, area.lon),
        radius_miles: area.radius,
        step_degrees: area.step,
        attribute: args.attribute.clone(),
        api_key: args.api_key.clone().filter(|key| !key.is_empty()),
        retry: RetryPolicy::new(args.attempts, Duration::from_millis(args.backoff_ms)),
    };

    if cli.verbose > 0 && config.api_key.is_none() {
        tracing::info!("no CENSUS_API_KEY set; statistics queries are unauthenticated");
    }

    let client = CensusClient::new(Duration::from_secs(args.timeout))?
        .with_endpoints(&args.geocoder_url, &args.stats_url);
    let pipeline = Pipeline::new(config, client.clone(), client);

    let report = pipeline.run()
        .with_context(|| format!("estimate around {} (radius {} mi)", pipeline.config().center, area.radius))?;

    if area.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Unique blocks: {}", report.blocks);
        println!("Total population: {}", report.population);
    }

    Ok(())
}
