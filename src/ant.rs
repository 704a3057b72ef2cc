use crate::events::VisualState;
use crate::geometry::{Point, Rect};
use crate::world::spatial::EntityId;

/// What an ant is currently trying to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Wandering in search of food
    Scouting,
    /// Carrying food back to the nest
    Returning,
}

/// A single forager
#[derive(Clone, Debug)]
pub struct Ant {
    pub id: EntityId,
    pub pos: Point,
    pub mode: Mode,
    energy: f64,
}

impl Ant {
    /// Create a new scouting ant at the given position
    pub fn new(id: EntityId, pos: Point, energy: f64) -> Self {
        Self {
            id,
            pos,
            mode: Mode::Scouting,
            energy,
        }
    }

    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Check if ant has run out of energy
    #[inline]
    pub fn is_starving(&self) -> bool {
        self.energy <= 0.0
    }

    #[inline]
    pub fn is_scouting(&self) -> bool {
        self.mode == Mode::Scouting
    }

    /// Burn `amount` of energy
    pub fn drain(&mut self, amount: f64) {
        self.energy -= amount;
    }

    pub fn refill(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0);
        self.energy += amount;
    }

    /// How much energy is missing up to `max`
    pub fn deficit(&self, max: f64) -> f64 {
        (max - self.energy).max(0.0)
    }

    #[inline]
    pub fn footprint(&self, radius: i32) -> Rect {
        Rect::around(self.pos, radius)
    }

    /// Colour-state projection for renderers; never consulted by the simulation.
    pub fn visual_state(&self) -> VisualState {
        match self.mode {
            Mode::Scouting => VisualState::Scouting,
            Mode::Returning => VisualState::Returning,
        }
    }
}
