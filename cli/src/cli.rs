/// Census population within a radius of a point
#[derive(clap::Parser, Debug)]
#[command(name = "censusradius", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Estimate the population living within a radius of a point
    Estimate(EstimateArgs),

    /// Print the sample grid for a radius without calling any service
    Sample(SampleArgs),

    /// Call a Census API endpoint directly and print the JSON response
    Query(QueryArgs),
}

#[derive(clap::Args, Debug)]
pub struct AreaArgs {
    /// Center latitude in decimal degrees
    #[arg(long, default_value_t = censusradius::DEFAULT_CENTER.lat, allow_negative_numbers = true)]
    pub lat: f64,

    /// Center longitude in decimal degrees
    #[arg(long, default_value_t = censusradius::DEFAULT_CENTER.lon, allow_negative_numbers = true)]
    pub lon: f64,

    /// Radius in miles (0 samples the center point only)
    #[arg(short, long, default_value_t = censusradius::DEFAULT_RADIUS_MILES, allow_negative_numbers = true)]
    pub radius: f64,

    /// Grid spacing in degrees
    #[arg(long, default_value_t = censusradius::DEFAULT_STEP_DEGREES)]
    pub step: f64,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub area: AreaArgs,

    /// Census variable to sum per block
    #[arg(long, default_value = censusradius::census::DEFAULT_ATTRIBUTE)]
    pub attribute: String,

    /// Census API key (optional; raises the service's rate limits)
    #[arg(long, env = "CENSUS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Attempts per service call before giving up
    #[arg(long, default_value_t = 3)]
    pub attempts: u32,

    /// Wait after the first failed attempt, doubled after each further failure
    #[arg(long, default_value_t = 1000)]
    pub backoff_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Geocoding endpoint (point -> census block)
    #[arg(long, default_value = censusradius::census::GEOCODER_URL)]
    pub geocoder_url: String,

    /// Statistics dataset endpoint
    #[arg(long, default_value = censusradius::census::STATS_URL)]
    pub stats_url: String,
}

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub area: AreaArgs,
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Dataset endpoint
    #[arg(default_value = censusradius::census::STATS_URL)]
    pub endpoint: String,

    /// Query parameter as key=value (repeatable); defaults to get=NAME for=state:*
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Census API key
    #[arg(long, env = "CENSUS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {s:?}"))
}
