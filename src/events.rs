//! Presentation hook.
//!
//! The simulation describes every visible change as an [`EntityUpdate`] and
//! hands it to an [`EventSink`]. Nothing in the core depends on a sink being
//! present or doing anything with the updates.

use colored::Colorize;

use crate::geometry::Point;
use crate::world::spatial::EntityKind;

/// How a renderer should draw an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    Nest,
    Food,
    Scouting,
    Returning,
    Trail,
}

impl VisualState {
    /// Suggested fill colour, as `#RRGGBB`.
    pub const fn color(self) -> &'static str {
        match self {
            VisualState::Nest => "#F27E1D",
            VisualState::Food => "#04C3D9",
            VisualState::Scouting => "#AF0220",
            VisualState::Returning => "#3BC302",
            VisualState::Trail => "#050994",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Created,
    Moved,
    Removed,
    Restyled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityUpdate {
    /// World entity id, or deposit id for [`EntityKind::Pheromone`].
    pub entity_id: u64,
    pub kind: EntityKind,
    pub position: Point,
    pub visual_state: VisualState,
    pub change: Change,
}

pub trait EventSink {
    fn emit(&mut self, update: EntityUpdate);
}

/// Discards everything; used for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn emit(&mut self, _update: EntityUpdate) {}
}

impl EventSink for Vec<EntityUpdate> {
    fn emit(&mut self, update: EntityUpdate) {
        self.push(update);
    }
}

/// Prints colony-level happenings (hatching, starvation, food relocation).
/// Moves, restyles and trail updates are too frequent to print and are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, update: EntityUpdate) {
        let at = format!("({}, {})", update.position.x, update.position.y);
        match (update.kind, update.change) {
            (EntityKind::Agent, Change::Created) => println!(
                "{} {} {}",
                "🐜".green(),
                format!("ant {} hatched at", update.entity_id).green(),
                at.dimmed()
            ),
            (EntityKind::Agent, Change::Removed) => println!(
                "{} {} {}",
                "💀".red(),
                format!("ant {} starved at", update.entity_id).red(),
                at.dimmed()
            ),
            (EntityKind::Food, Change::Moved) => println!(
                "{} {} {}",
                "🍃".cyan(),
                "food source exhausted, relocated to".cyan(),
                at.yellow()
            ),
            _ => {}
        }
    }
}
