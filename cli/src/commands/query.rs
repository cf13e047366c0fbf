use std::time::Duration;

use anyhow::Result;
use censusradius::census::CensusClient;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::QueryArgs) -> Result<()> {
    let params: Vec<(&str, &str)> = if args.params.is_empty() {
        vec![("get", "NAME"), ("for", "state:*")]
    } else {
        args.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    };

    let client = CensusClient::new(Duration::from_secs(args.timeout))?;
    let body = client.call_api(&args.endpoint, &params, args.api_key.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
