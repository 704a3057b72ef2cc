use thiserror::Error;

/// A configuration value that cannot describe a runnable world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world bounds must be at least 2x2, got {width}x{height}")]
    EmptyWorld { width: i32, height: i32 },
    #[error("world {width}x{height} exceeds the maximum area of {max} cells")]
    WorldTooLarge { width: i32, height: i32, max: usize },
    #[error("placement_margin {margin} leaves no room inside a {width}x{height} world")]
    MarginTooLarge { margin: i32, width: i32, height: i32 },
    #[error("step_size must be positive, got {0}")]
    StepSize(i32),
    #[error("step_size {step} must be smaller than the shorter world side {limit}")]
    StepTooLarge { step: i32, limit: i32 },
    #[error("{field} {value} must be smaller than the shorter world side {limit}")]
    RadiusTooLarge { field: &'static str, value: i32, limit: i32 },
    #[error("{field} must be positive, got {value}")]
    NonPositiveRadius { field: &'static str, value: i32 },
    #[error("ant_radius must not be negative, got {0}")]
    NegativeAntRadius(i32),
    #[error("food_capacity must be positive")]
    FoodCapacity,
    #[error("pheromone_life must be positive")]
    PheromoneLife,
    #[error("trail_deposit_chance must lie in [0, 1], got {0}")]
    DepositChance(f64),
    #[error("max_bias_weight must be positive")]
    BiasWeight,
    #[error("{field} must be a positive finite number, got {value}")]
    Energy { field: &'static str, value: f64 },
    #[error("initial_energy {initial} exceeds max_energy {max}")]
    EnergyAboveMax { initial: f64, max: f64 },
    #[error("energy_decay must be a non-negative finite number, got {0}")]
    EnergyDecay(f64),
    #[error("reproduction_cost must be a positive finite number, got {0}")]
    ReproductionCost(f64),
    #[error("initial_food_storage must be a non-negative finite number, got {0}")]
    FoodStorage(f64),
    #[error("spatial_cell_size must be positive, got {0}")]
    CellSize(i32),
    #[error("{field} position ({x}, {y}) lies outside the world")]
    OutOfBounds { field: &'static str, x: i32, y: i32 },
}

/// Errors surfaced before a simulation starts.
#[derive(Debug, Error)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for [`SimConfig`](crate::config::SimConfig)
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Config parsed but describes an impossible world
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
