use crate::ant::Ant;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::events::{Change, EntityUpdate, VisualState};
use crate::geometry::{Bounds, Point};
use crate::pheromone::PheromoneField;
use crate::world::site::{Food, Nest};
use crate::world::spatial::{EntityId, EntityKind, SpatialIndex};

const NEST_ID: EntityId = EntityId(0);
const FOOD_ID: EntityId = EntityId(1);

/// Everything the simulation mutates: one nest, one food source, the live
/// ants in creation order, the trail field and the index over footprints.
#[derive(Clone, Debug)]
pub struct World {
    config: SimConfig,
    pub bounds: Bounds,
    pub nest: Nest,
    pub food: Food,
    pub ants: Vec<Ant>,
    pub pheromones: PheromoneField,
    pub index: SpatialIndex,
    next_id: u64,
}

impl World {
    /// Validate `config` and build the initial world. Nest and food take
    /// their configured positions or a random spot inside the placement margin.
    pub fn new(config: SimConfig, rng: &mut fastrand::Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds();

        let nest_pos = config
            .nest
            .unwrap_or_else(|| random_site(bounds, config.placement_margin, rng));
        let food_pos = config
            .food
            .unwrap_or_else(|| random_site(bounds, config.placement_margin, rng));

        let nest = Nest::new(NEST_ID, nest_pos, config.nest_radius, config.initial_food_storage);
        let food = Food::new(FOOD_ID, food_pos, config.food_radius, config.food_capacity);

        let mut index = SpatialIndex::new(bounds, config.spatial_cell_size);
        index.insert(nest.id, EntityKind::Nest, nest.footprint());
        index.insert(food.id, EntityKind::Food, food.footprint());

        let mut world = Self {
            bounds,
            nest,
            food,
            ants: Vec::with_capacity(config.initial_ants),
            pheromones: PheromoneField::new(bounds),
            index,
            next_id: FOOD_ID.0 + 1,
            config,
        };
        for _ in 0..world.config.initial_ants {
            world.spawn_ant();
        }

        tracing::debug!(
            nest = ?world.nest.pos,
            food = ?world.food.pos,
            ants = world.ants.len(),
            "world created"
        );
        Ok(world)
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Hatch a fresh scout at the nest and start tracking it.
    pub fn spawn_ant(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let ant = Ant::new(id, self.nest.pos, self.config.initial_energy);
        self.index
            .insert(id, EntityKind::Agent, ant.footprint(self.config.ant_radius));
        self.ants.push(ant);
        id
    }

    /// Drop every ant matching `dead`, preserving the order of the rest.
    pub fn remove_ants_where(
        &mut self,
        mut dead: impl FnMut(&Ant) -> bool,
        mut on_removed: impl FnMut(&Ant),
    ) -> usize {
        let before = self.ants.len();
        let index = &mut self.index;
        self.ants.retain(|ant| {
            if dead(ant) {
                index.remove(ant.id);
                on_removed(ant);
                false
            } else {
                true
            }
        });
        before - self.ants.len()
    }

    /// Re-seat the exhausted food source at a random site with full life.
    pub fn relocate_food(&mut self, rng: &mut fastrand::Rng) -> Point {
        let pos = random_site(self.bounds, self.config.placement_margin, rng);
        self.food.relocate(pos);
        self.index.move_to(self.food.id, self.food.footprint());
        pos
    }

    /// Count live ants
    pub fn live_ants(&self) -> usize {
        self.ants.len()
    }

    /// `Created` updates for every entity, for drawing a first frame.
    pub fn entity_updates(&self) -> Vec<EntityUpdate> {
        let mut updates = Vec::with_capacity(2 + self.ants.len() + self.pheromones.len());
        updates.push(EntityUpdate {
            entity_id: self.nest.id.0,
            kind: EntityKind::Nest,
            position: self.nest.pos,
            visual_state: VisualState::Nest,
            change: Change::Created,
        });
        updates.push(EntityUpdate {
            entity_id: self.food.id.0,
            kind: EntityKind::Food,
            position: self.food.pos,
            visual_state: VisualState::Food,
            change: Change::Created,
        });
        updates.extend(self.pheromones.iter().map(|d| EntityUpdate {
            entity_id: d.id.0,
            kind: EntityKind::Pheromone,
            position: d.pos,
            visual_state: VisualState::Trail,
            change: Change::Created,
        }));
        updates.extend(self.ants.iter().map(|a| EntityUpdate {
            entity_id: a.id.0,
            kind: EntityKind::Agent,
            position: a.pos,
            visual_state: a.visual_state(),
            change: Change::Created,
        }));
        updates
    }
}

/// Uniform position at least `margin` away from every edge.
pub fn random_site(bounds: Bounds, margin: i32, rng: &mut fastrand::Rng) -> Point {
    Point::new(
        rng.i32(margin..bounds.width - margin),
        rng.i32(margin..bounds.height - margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ant::Mode;

    fn config() -> SimConfig {
        SimConfig {
            initial_ants: 5,
            nest: Some(Point::new(100, 100)),
            food: Some(Point::new(300, 300)),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_world_creation() {
        let mut rng = fastrand::Rng::with_seed(123);
        let world = World::new(config(), &mut rng).unwrap();

        assert_eq!(world.live_ants(), 5);
        assert_eq!(world.nest.pos, Point::new(100, 100));
        assert_eq!(world.food.life(), 100);
        assert_eq!(world.index.len(), 7);
        assert!(world.pheromones.is_empty());
        for (i, ant) in world.ants.iter().enumerate() {
            assert_eq!(ant.id, EntityId(2 + i as u64));
            assert_eq!(ant.pos, world.nest.pos);
            assert_eq!(ant.mode, Mode::Scouting);
        }
    }

    #[test]
    fn test_ids_keep_counting_past_u32() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut world = World::new(config(), &mut rng).unwrap();
        world.next_id = u64::from(u32::MAX);

        let a = world.spawn_ant();
        let b = world.spawn_ant();
        assert_eq!(a, EntityId(u64::from(u32::MAX)));
        assert_eq!(b, EntityId(u64::from(u32::MAX) + 1));
        assert_eq!(world.index.kind_of(b), Some(EntityKind::Agent));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut rng = fastrand::Rng::with_seed(1);
        let cfg = SimConfig { step_size: -3, ..config() };
        assert_eq!(World::new(cfg, &mut rng).unwrap_err(), ConfigError::StepSize(-3));
    }

    #[test]
    fn test_random_sites_respect_margin() {
        let mut rng = fastrand::Rng::with_seed(5);
        let bounds = Bounds::new(500, 300);
        for _ in 0..1000 {
            let p = random_site(bounds, 50, &mut rng);
            assert!((50..450).contains(&p.x));
            assert!((50..250).contains(&p.y));
        }
    }

    #[test]
    fn test_relocate_food_resets_life_and_index() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut world = World::new(config(), &mut rng).unwrap();
        while !world.food.consume() {}

        let pos = world.relocate_food(&mut rng);
        assert_eq!(world.food.life(), world.food.capacity());
        assert_eq!(world.index.footprint(world.food.id), Some(world.food.footprint()));
        assert_eq!(world.food.pos, pos);
    }

    #[test]
    fn test_remove_ants_where_keeps_order_and_index() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut world = World::new(config(), &mut rng).unwrap();
        let mut removed = Vec::new();

        let n = world.remove_ants_where(|a| a.id.0 % 2 == 0, |a| removed.push(a.id));

        assert_eq!(n, 3);
        assert_eq!(removed, vec![EntityId(2), EntityId(4), EntityId(6)]);
        let left: Vec<_> = world.ants.iter().map(|a| a.id).collect();
        assert_eq!(left, vec![EntityId(3), EntityId(5)]);
        assert_eq!(world.index.kind_of(EntityId(2)), None);
        assert_eq!(world.index.len(), 4);
    }

    #[test]
    fn test_entity_updates_cover_everything() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut world = World::new(config(), &mut rng).unwrap();
        world.pheromones.deposit(Point::new(10, 10), 30, 100);

        let updates = world.entity_updates();
        assert_eq!(updates.len(), 2 + 1 + 5);
        assert!(updates.iter().all(|u| u.change == Change::Created));
        assert_eq!(updates[0].kind, EntityKind::Nest);
    }
}
