use std::process::ExitCode;

use ant_colony_sim::prelude::*;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    args.apply_overrides(&mut config);

    let mut rng = if let Some(seed) = args.seed {
        fastrand::Rng::with_seed(seed)
    } else {
        fastrand::Rng::new()
    };

    let world = World::new(config, &mut rng)?;
    let mut engine = SimulationEngine::new(world, rng);

    let summary = if args.suppress_events {
        engine.run_simulation(args.ticks, args.report_every, &mut NullSink)
    } else {
        engine.run_simulation(args.ticks, args.report_every, &mut ConsoleSink)
    };

    engine.print_summary(&summary);
    Ok(())
}
