mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{estimate, query, sample};
use tracing_subscriber::EnvFilter;

/// Log to stderr; `-v` flags pick the level unless RUST_LOG is set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Estimate(args) => estimate::run(&cli, args),
        Commands::Sample(args) => sample::run(&cli, args),
        Commands::Query(args) => query::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
