use clap::Parser;
use propedge::cli::{self, Cli, Commands};
use propedge::error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let engine = cli::build_engine(&cli)?;
    match &cli.command {
        Commands::Score { input } => cli::run_score(&engine, input, cli.json)?,
        Commands::Parlay { input, legs, tier } => {
            cli::run_parlay(&engine, input, *legs, *tier, cli.json)?
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,propedge=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
