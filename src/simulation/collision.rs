use crate::ant::Ant;
use crate::world::spatial::{EntityKind, SpatialIndex};

/// What an ant is standing on after its move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Nest,
    Food,
    Nothing,
}

/// Resolve the ant's footprint against the index. When nest and food both
/// overlap, the nest wins; other ants and trail markers count as nothing.
#[inline]
pub fn detect(index: &SpatialIndex, ant: &Ant, ant_radius: i32) -> Contact {
    match index.top_overlapping(ant.footprint(ant_radius), Some(ant.id)) {
        Some((_, EntityKind::Nest)) => Contact::Nest,
        Some((_, EntityKind::Food)) => Contact::Food,
        _ => Contact::Nothing,
    }
}
