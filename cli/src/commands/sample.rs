use anyhow::Result;
use censusradius::{sample, Coordinate};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::SampleArgs) -> Result<()> {
    let area = &args.area;
    let points = sample(Coordinate::new(area.lat, area.lon), area.radius, area.step)?;

    if area.json {
        println!("{}", serde_json::to_string(&points)?);
    } else {
        println!("Sample points: {}", points.len());
    }

    Ok(())
}
