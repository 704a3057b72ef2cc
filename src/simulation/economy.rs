//! Nest food storage, agent energy and reproduction.

use crate::ant::Ant;
use crate::events::{Change, EntityUpdate, EventSink, VisualState};
use crate::world::site::Nest;
use crate::world::spatial::EntityKind;
use crate::world::World;

/// Food added to the nest by one delivery.
pub const FOOD_PER_DELIVERY: f64 = 1.0;

/// Most ants hatched in a single tick; any surplus storage carries over.
pub const MAX_BIRTHS_PER_TICK: u32 = 10_000;

/// Top `ant` up towards `max_energy` from nest storage.
/// Transfers `min(deficit, storage)` and returns the amount moved.
pub fn feed(nest: &mut Nest, ant: &mut Ant, max_energy: f64) -> f64 {
    let amount = nest.withdraw(ant.deficit(max_energy));
    ant.refill(amount);
    amount
}

/// Mint `floor(storage / cost)` ants once storage exceeds the per-ant cost,
/// at most [`MAX_BIRTHS_PER_TICK`] of them.
pub fn reproduce(world: &mut World, sink: &mut dyn EventSink) -> u32 {
    let cost = world.config().reproduction_cost;
    let storage = world.nest.food_storage();
    if storage <= cost {
        return 0;
    }

    let affordable = (storage / cost).floor();
    let born = if affordable >= f64::from(MAX_BIRTHS_PER_TICK) {
        MAX_BIRTHS_PER_TICK
    } else {
        affordable as u32
    };
    world.nest.spend(f64::from(born) * cost);
    for _ in 0..born {
        let id = world.spawn_ant();
        sink.emit(EntityUpdate {
            entity_id: id.0,
            kind: EntityKind::Agent,
            position: world.nest.pos,
            visual_state: VisualState::Scouting,
            change: Change::Created,
        });
    }
    tracing::debug!(born, storage = world.nest.food_storage(), "colony reproduced");
    born
}

/// Charge every ant its per-tick energy cost.
pub fn burn_energy(world: &mut World) {
    let decay = world.config().energy_decay;
    for ant in &mut world.ants {
        ant.drain(decay);
    }
}

/// Remove every ant whose energy is exhausted. Returns how many died.
pub fn starvation_sweep(world: &mut World, sink: &mut dyn EventSink) -> u32 {
    let dead = world.remove_ants_where(Ant::is_starving, |ant| {
        tracing::debug!(ant = ant.id.0, pos = ?ant.pos, "ant starved");
        sink.emit(EntityUpdate {
            entity_id: ant.id.0,
            kind: EntityKind::Agent,
            position: ant.pos,
            visual_state: ant.visual_state(),
            change: Change::Removed,
        });
    });
    debug_assert!(world.ants.iter().all(|a| a.energy() > 0.0));
    dead as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::geometry::Point;
    use crate::config::SimConfig;
    use crate::world::spatial::EntityId;

    fn world(storage: f64, ants: usize) -> World {
        let mut rng = fastrand::Rng::with_seed(8);
        let cfg = SimConfig {
            initial_ants: ants,
            resource_constrained: true,
            reproduction_cost: 100.0,
            initial_food_storage: storage,
            initial_energy: 3.0,
            max_energy: 10.0,
            ..SimConfig::default()
        };
        World::new(cfg, &mut rng).unwrap()
    }

    #[test]
    fn test_feed_is_bounded_by_storage() {
        let mut nest = Nest::new(EntityId(0), Point::new(0, 0), 20, 4.0);
        let mut ant = Ant::new(EntityId(2), Point::new(0, 0), 3.0);

        assert_eq!(feed(&mut nest, &mut ant, 10.0), 4.0);
        assert_eq!(ant.energy(), 7.0);
        assert_eq!(nest.food_storage(), 0.0);
    }

    #[test]
    fn test_feed_only_covers_deficit() {
        let mut nest = Nest::new(EntityId(0), Point::new(0, 0), 20, 50.0);
        let mut ant = Ant::new(EntityId(2), Point::new(0, 0), 8.0);

        assert_eq!(feed(&mut nest, &mut ant, 10.0), 2.0);
        assert_eq!(nest.food_storage(), 48.0);
        assert_eq!(feed(&mut nest, &mut ant, 10.0), 0.0);
    }

    #[test]
    fn test_reproduction_mints_floor_of_storage_over_cost() {
        let mut w = world(250.0, 1);
        let mut events: Vec<EntityUpdate> = Vec::new();

        assert_eq!(reproduce(&mut w, &mut events), 2);
        assert_eq!(w.nest.food_storage(), 50.0);
        assert_eq!(w.live_ants(), 3);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.change == Change::Created && e.position == w.nest.pos));
    }

    #[test]
    fn test_reproduction_needs_storage_above_cost() {
        let mut w = world(100.0, 1);
        assert_eq!(reproduce(&mut w, &mut NullSink), 0);
        assert_eq!(w.nest.food_storage(), 100.0);
    }

    #[test]
    fn test_huge_surplus_hatches_in_capped_batches() {
        let mut rng = fastrand::Rng::with_seed(8);
        let cfg = SimConfig {
            initial_ants: 0,
            resource_constrained: true,
            reproduction_cost: 1.0,
            initial_food_storage: 25_000.5,
            ..SimConfig::default()
        };
        let mut w = World::new(cfg, &mut rng).unwrap();

        assert_eq!(reproduce(&mut w, &mut NullSink), MAX_BIRTHS_PER_TICK);
        assert_eq!(w.nest.food_storage(), 15_000.5);
        assert_eq!(w.live_ants(), MAX_BIRTHS_PER_TICK as usize);

        assert_eq!(reproduce(&mut w, &mut NullSink), MAX_BIRTHS_PER_TICK);
        assert_eq!(reproduce(&mut w, &mut NullSink), 5_000);
        assert_eq!(w.nest.food_storage(), 0.5);
        assert_eq!(w.index.len(), 25_000 + 2);
    }

    #[test]
    fn test_starvation_sweep_removes_exhausted_ants() {
        let mut w = world(0.0, 3);
        w.ants[1].drain(1.0);

        burn_energy(&mut w);
        burn_energy(&mut w);
        assert_eq!(starvation_sweep(&mut w, &mut NullSink), 1);
        assert_eq!(w.live_ants(), 2);

        burn_energy(&mut w);
        let mut events: Vec<EntityUpdate> = Vec::new();
        assert_eq!(starvation_sweep(&mut w, &mut events), 2);
        assert!(w.ants.is_empty());
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.change == Change::Removed));
    }
}
