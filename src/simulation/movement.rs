//! Per-tick movement policy.
//!
//! Candidate moves are a counted multiset over the eight directions: each
//! direction carries a repetition weight and one move is drawn in proportion
//! to it. Precedence:
//!
//! 1. On a world edge, every move that does not lead further out is equally
//!    likely.
//! 2. A scout weighs each quadrant `q` by the trail strength `D(q)` inside it:
//!    `w(q) = min(D(q), max_bias_weight)` when `D(q) > density_threshold`,
//!    otherwise `0`. Quadrants split at the ant's own cell, so strength is
//!    never counted twice and no population correction is needed. All-zero
//!    weights fall back to a uniform draw.
//! 3. A returning ant weighs only the quadrants the nest overlaps:
//!    `w(q) = clamp(D(q), 1, max_bias_weight)` there, `0` elsewhere, so it
//!    heads home and prefers the better-marked way back.
//!
//! Each quadrant weight is added to its three directions, so directions
//! shared by two attractive quadrants accumulate both.

use crate::ant::{Ant, Mode};
use crate::direction::{Direction, Quadrant};
use crate::geometry::{Bounds, Point};
use crate::pheromone::PheromoneField;
use crate::utils::choose_weighted;
use crate::world::spatial::{EntityKind, SpatialIndex};
use crate::world::World;

/// Repetition weight per direction, indexed by [`Direction::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepWeights([u32; 8]);

impl StepWeights {
    pub const fn uniform() -> Self {
        Self([1; 8])
    }

    pub const fn empty() -> Self {
        Self([0; 8])
    }

    #[inline]
    pub fn weight(&self, direction: Direction) -> u32 {
        self.0[direction.index()]
    }

    /// Add `weight` copies of each move heading into `quadrant`.
    pub fn add_quadrant(&mut self, quadrant: Quadrant, weight: u32) {
        for d in quadrant.directions() {
            let w = &mut self.0[d.index()];
            *w = w.saturating_add(weight);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<Direction> {
        choose_weighted(rng, &self.0).map(|i| Direction::ALL[i])
    }
}

/// Quadrant weighting knobs, taken from the config.
#[derive(Clone, Copy, Debug)]
pub struct Steering {
    pub density_threshold: u64,
    pub max_bias_weight: u32,
}

/// Moves that keep an edge-bound ant from drifting further out.
pub fn boundary_steps(pos: Point, bounds: Bounds) -> StepWeights {
    let mut steps = StepWeights::uniform();
    for d in Direction::ALL {
        let (dx, dy) = d.delta();
        let outward = (pos.x <= 0 && dx < 0)
            || (pos.x >= bounds.width - 1 && dx > 0)
            || (pos.y <= 0 && dy < 0)
            || (pos.y >= bounds.height - 1 && dy > 0);
        if outward {
            steps.0[d.index()] = 0;
        }
    }
    steps
}

/// Scout weighting towards stronger trail. Empty when no quadrant qualifies.
pub fn trail_steps(field: &PheromoneField, pos: Point, steering: Steering) -> StepWeights {
    let mut steps = StepWeights::empty();
    if field.is_empty() {
        return steps;
    }
    for q in Quadrant::ALL {
        let density = field.directional_density(pos, q);
        if density > steering.density_threshold {
            steps.add_quadrant(q, density.min(u64::from(steering.max_bias_weight)) as u32);
        }
    }
    steps
}

/// Returning weighting towards the quadrants the nest lies in.
pub fn homing_steps(
    index: &SpatialIndex,
    field: &PheromoneField,
    pos: Point,
    bounds: Bounds,
    steering: Steering,
) -> StepWeights {
    let mut steps = StepWeights::empty();
    for q in Quadrant::ALL {
        if index.count_in_rect(q.corner_rect(pos, bounds), EntityKind::Nest) == 0 {
            continue;
        }
        let density = field.directional_density(pos, q);
        let weight = density.clamp(1, u64::from(steering.max_bias_weight)) as u32;
        steps.add_quadrant(q, weight);
    }
    steps
}

/// Full candidate multiset for `ant` this tick.
pub fn candidate_steps(world: &World, ant: &Ant) -> StepWeights {
    let cfg = world.config();
    let steering = Steering {
        density_threshold: cfg.density_threshold,
        max_bias_weight: cfg.max_bias_weight,
    };

    if world.bounds.on_edge(ant.pos) {
        return boundary_steps(ant.pos, world.bounds);
    }

    let steps = match ant.mode {
        Mode::Scouting => trail_steps(&world.pheromones, ant.pos, steering),
        Mode::Returning => homing_steps(&world.index, &world.pheromones, ant.pos, world.bounds, steering),
    };
    if steps.is_empty() {
        StepWeights::uniform()
    } else {
        steps
    }
}

pub fn choose_direction(world: &World, ant: &Ant, rng: &mut fastrand::Rng) -> Direction {
    match candidate_steps(world, ant).pick(rng) {
        Some(d) => d,
        // Only reachable in a world narrower than two cells, which config validation forbids.
        None => Direction::ALL[rng.usize(..Direction::ALL.len())],
    }
}
