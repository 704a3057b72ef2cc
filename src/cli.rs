use std::path::PathBuf;

use clap::Parser;

use crate::config::SimConfig;

/// CLI arguments for the colony simulation
#[derive(Parser, Debug)]
#[command(name = "ant_colony_sim", about = "🐜 Ant colony foraging simulator")]
pub struct Args {
    /// Number of ants at start (overrides the config file)
    #[arg(short = 'n', long = "ants")]
    pub ants: Option<usize>,

    /// Path to a TOML config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Maximum number of ticks to run
    #[arg(long, default_value_t = 10_000)]
    pub ticks: u64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// World width in cells
    #[arg(long)]
    pub width: Option<i32>,

    /// World height in cells
    #[arg(long)]
    pub height: Option<i32>,

    /// Distance an ant covers per tick
    #[arg(long)]
    pub step_size: Option<i32>,

    /// Enable the energy economy (starvation and reproduction)
    #[arg(long, default_value_t = false)]
    pub starvation: bool,

    /// Print a statistics line every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    pub report_every: u64,

    /// Suppress colony event logs (for benchmarks)
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Layer command-line values over a loaded config.
    pub fn apply_overrides(&self, config: &mut SimConfig) {
        if let Some(ants) = self.ants {
            config.initial_ants = ants;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(step) = self.step_size {
            config.step_size = step;
        }
        if self.starvation {
            config.resource_constrained = true;
        }
    }
}
