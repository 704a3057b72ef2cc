//! # Ant Colony Sim
//!
//! A headless simulation of an ant colony foraging on a bounded 2-D grid.
//!
//! Scouts wander until they touch the food source, then carry food home,
//! laying a decaying pheromone trail that biases later scouts. An optional
//! resource economy makes ants burn energy every tick, feeds them from nest
//! storage and turns surplus storage into new ants.

pub mod ant;
pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod geometry;
pub mod pheromone;
pub mod simulation;
pub mod utils;
pub mod world;

pub use ant::{Ant, Mode};
pub use cli::Args;
pub use config::SimConfig;
pub use direction::{Direction, Quadrant};
pub use error::{ConfigError, Error, Result};
pub use events::{ConsoleSink, EntityUpdate, EventSink, NullSink};
pub use geometry::{Bounds, Point, Rect};
pub use pheromone::PheromoneField;
pub use simulation::{SimulationEngine, TickOutcome, TickStats};
pub use world::World;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Ant, Args, ConfigError, ConsoleSink, Direction, EntityUpdate, Error, EventSink, Mode,
        NullSink, Point, Result, SimConfig, SimulationEngine, TickOutcome, World,
    };
}
