pub mod collision;
pub mod economy;
pub mod engine;
pub mod movement;
pub mod stats;

pub use engine::{RunSummary, SimulationEngine, TickOutcome};
pub use stats::{TickEvents, TickStats};
