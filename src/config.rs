//! Simulation parameters.
//!
//! A [`SimConfig`] is read once when the [`World`](crate::world::World) is
//! built and never changes afterwards. Values come from `Default`, then an
//! optional TOML file, then command-line overrides:
//!
//! ```toml
//! width = 500
//! height = 500
//! initial_ants = 50
//! step_size = 7
//! resource_constrained = true
//! reproduction_cost = 100.0
//!
//! [nest]
//! x = 120
//! y = 240
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::geometry::{Bounds, Point};

/// Largest world (in cells) the pheromone strength grid is allowed to cover.
pub const MAX_WORLD_AREA: usize = 1 << 22;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub initial_ants: usize,
    /// Distance covered per tick, identical for axis and diagonal moves.
    pub step_size: i32,
    pub nest_radius: i32,
    pub food_radius: i32,
    pub ant_radius: i32,
    /// Nest and food are placed at least this far from every edge.
    pub placement_margin: i32,
    /// Visits a food source survives before it relocates.
    pub food_capacity: u32,
    pub pheromone_life: u32,
    /// Strength laid at the contact point when a scout reaches food.
    pub pheromone_batch: u32,
    /// Chance, per unit of distance walked, that a returning ant marks the trail.
    pub trail_deposit_chance: f64,
    pub trail_deposit_quantity: u32,
    /// Quadrants need strictly more trail strength than this to attract scouts.
    pub density_threshold: u64,
    /// Upper bound on the repetition weight any single quadrant can earn.
    pub max_bias_weight: u32,
    /// Ants burn energy, starve and are fed from (and bred by) the nest.
    pub resource_constrained: bool,
    pub initial_energy: f64,
    pub max_energy: f64,
    pub energy_decay: f64,
    pub reproduction_cost: f64,
    pub initial_food_storage: f64,
    pub spatial_cell_size: i32,
    pub nest: Option<Point>,
    pub food: Option<Point>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            initial_ants: 50,
            step_size: 7,
            nest_radius: 20,
            food_radius: 10,
            ant_radius: 2,
            placement_margin: 50,
            food_capacity: 100,
            pheromone_life: 100,
            pheromone_batch: 30,
            trail_deposit_chance: 1.0 / 25.0,
            trail_deposit_quantity: 1,
            density_threshold: 1,
            max_bias_weight: 64,
            resource_constrained: false,
            initial_energy: 1000.0,
            max_energy: 1000.0,
            energy_decay: 1.0,
            reproduction_cost: 100.0,
            initial_food_storage: 0.0,
            spatial_cell_size: 32,
            nest: None,
            food: None,
        }
    }
}

impl SimConfig {
    /// Load a config from a TOML file; missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Check every parameter, reporting the first one that is out of range.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width < 2 || height < 2 {
            return Err(ConfigError::EmptyWorld { width, height });
        }
        if self.bounds().area() > MAX_WORLD_AREA {
            return Err(ConfigError::WorldTooLarge { width, height, max: MAX_WORLD_AREA });
        }
        let margin = self.placement_margin;
        if margin < 0 || margin.saturating_mul(2) >= width.min(height) {
            return Err(ConfigError::MarginTooLarge { margin, width, height });
        }
        let side = width.min(height);
        if self.step_size <= 0 {
            return Err(ConfigError::StepSize(self.step_size));
        }
        if self.step_size >= side {
            return Err(ConfigError::StepTooLarge { step: self.step_size, limit: side });
        }
        for (field, value) in [("nest_radius", self.nest_radius), ("food_radius", self.food_radius)] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveRadius { field, value });
            }
        }
        if self.ant_radius < 0 {
            return Err(ConfigError::NegativeAntRadius(self.ant_radius));
        }
        for (field, value) in [
            ("nest_radius", self.nest_radius),
            ("food_radius", self.food_radius),
            ("ant_radius", self.ant_radius),
        ] {
            if value >= side {
                return Err(ConfigError::RadiusTooLarge { field, value, limit: side });
            }
        }
        if self.food_capacity == 0 {
            return Err(ConfigError::FoodCapacity);
        }
        if self.pheromone_life == 0 {
            return Err(ConfigError::PheromoneLife);
        }
        if !(0.0..=1.0).contains(&self.trail_deposit_chance) {
            return Err(ConfigError::DepositChance(self.trail_deposit_chance));
        }
        if self.max_bias_weight == 0 {
            return Err(ConfigError::BiasWeight);
        }
        for (field, value) in [("initial_energy", self.initial_energy), ("max_energy", self.max_energy)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Energy { field, value });
            }
        }
        if self.initial_energy > self.max_energy {
            return Err(ConfigError::EnergyAboveMax {
                initial: self.initial_energy,
                max: self.max_energy,
            });
        }
        if !self.energy_decay.is_finite() || self.energy_decay < 0.0 {
            return Err(ConfigError::EnergyDecay(self.energy_decay));
        }
        if !self.reproduction_cost.is_finite() || self.reproduction_cost <= 0.0 {
            return Err(ConfigError::ReproductionCost(self.reproduction_cost));
        }
        if !self.initial_food_storage.is_finite() || self.initial_food_storage < 0.0 {
            return Err(ConfigError::FoodStorage(self.initial_food_storage));
        }
        if self.spatial_cell_size <= 0 {
            return Err(ConfigError::CellSize(self.spatial_cell_size));
        }
        for (field, pos) in [("nest", self.nest), ("food", self.food)] {
            if let Some(p) = pos {
                if !self.bounds().contains(p) {
                    return Err(ConfigError::OutOfBounds { field, x: p.x, y: p.y });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = SimConfig::from_toml_str(
            "width = 300\nresource_constrained = true\n[food]\nx = 10\ny = 20\n",
        )
        .unwrap();

        assert_eq!(cfg.width, 300);
        assert_eq!(cfg.height, 500);
        assert!(cfg.resource_constrained);
        assert_eq!(cfg.food, Some(Point::new(10, 20)));
        assert_eq!(cfg.nest, None);
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let err = SimConfig::from_toml_str("widht = 300\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let cfg = SimConfig { step_size: 0, ..SimConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::StepSize(0)));
    }

    #[test]
    fn test_rejects_step_longer_than_world() {
        let cfg = SimConfig { step_size: i32::MAX, ..SimConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::StepTooLarge { step: i32::MAX, limit: 500 })
        );

        let cfg = SimConfig { width: 300, height: 120, step_size: 120, ..SimConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::StepTooLarge { step: 120, limit: 120 }));

        let cfg = SimConfig { width: 300, height: 120, step_size: 119, ..SimConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_radius_larger_than_world() {
        let cfg = SimConfig { nest_radius: 500, ..SimConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::RadiusTooLarge { field: "nest_radius", value: 500, limit: 500 })
        );

        let cfg = SimConfig { food_radius: i32::MAX, ..SimConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RadiusTooLarge { field: "food_radius", .. })
        ));

        let cfg = SimConfig { ant_radius: 900, ..SimConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RadiusTooLarge { field: "ant_radius", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_bounds() {
        let cfg = SimConfig { width: 0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyWorld { .. })));
    }

    #[test]
    fn test_rejects_margin_that_swallows_world() {
        let cfg = SimConfig { width: 100, placement_margin: 50, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::MarginTooLarge { .. })));
    }

    #[test]
    fn test_rejects_initial_energy_above_max() {
        let cfg = SimConfig { initial_energy: 20.0, max_energy: 10.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::EnergyAboveMax { .. })));
    }

    #[test]
    fn test_rejects_out_of_bounds_nest() {
        let cfg = SimConfig { nest: Some(Point::new(500, 10)), ..SimConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OutOfBounds { field: "nest", x: 500, y: 10 })
        );
    }

    #[test]
    fn test_rejects_bad_probability() {
        let cfg = SimConfig { trail_deposit_chance: 1.5, ..SimConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::DepositChance(1.5)));
    }
}
