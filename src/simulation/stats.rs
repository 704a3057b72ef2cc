use crate::ant::Mode;
use crate::world::World;

/// Things that happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub births: u32,
    pub deaths: u32,
    pub pickups: u32,
    pub deliveries: u32,
    pub food_relocations: u32,
}

impl TickEvents {
    pub fn accumulate(&mut self, other: &TickEvents) {
        self.births += other.births;
        self.deaths += other.deaths;
        self.pickups += other.pickups;
        self.deliveries += other.deliveries;
        self.food_relocations += other.food_relocations;
    }
}

/// Aggregate snapshot taken at the end of a tick, for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub tick: u64,
    pub live_agents: usize,
    pub scouting: usize,
    pub returning: usize,
    /// Mean energy of live agents; zero when none are left.
    pub average_energy: f64,
    pub food_storage: f64,
    pub food_life: u32,
    /// Number of live deposits, not strength units: a food pickup lays one
    /// deposit carrying the whole batch.
    pub pheromone_count: usize,
    /// Summed strength of every live deposit.
    pub pheromone_strength: u64,
    pub events: TickEvents,
}

impl TickStats {
    pub fn collect(world: &World, tick: u64, events: TickEvents) -> Self {
        let live_agents = world.ants.len();
        let returning = world
            .ants
            .iter()
            .filter(|a| a.mode == Mode::Returning)
            .count();
        let average_energy = if live_agents == 0 {
            0.0
        } else {
            world.ants.iter().map(|a| a.energy()).sum::<f64>() / live_agents as f64
        };

        Self {
            tick,
            live_agents,
            scouting: live_agents - returning,
            returning,
            average_energy,
            food_storage: world.nest.food_storage(),
            food_life: world.food.life(),
            pheromone_count: world.pheromones.len(),
            pheromone_strength: world.pheromones.total_strength(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::geometry::Point;

    #[test]
    fn test_collect_counts_modes_and_energy() {
        let mut rng = fastrand::Rng::with_seed(4);
        let cfg = SimConfig { initial_ants: 4, initial_energy: 10.0, max_energy: 10.0, ..SimConfig::default() };
        let mut world = World::new(cfg, &mut rng).unwrap();
        world.ants[0].mode = Mode::Returning;
        world.ants[1].drain(6.0);
        world.pheromones.deposit(Point::new(3, 3), 30, 100);

        let stats = TickStats::collect(&world, 7, TickEvents::default());
        assert_eq!(stats.tick, 7);
        assert_eq!(stats.live_agents, 4);
        assert_eq!(stats.returning, 1);
        assert_eq!(stats.scouting, 3);
        assert_eq!(stats.average_energy, 34.0 / 4.0);
        assert_eq!(stats.food_life, 100);
        assert_eq!(stats.pheromone_count, 1);
        assert_eq!(stats.pheromone_strength, 30);
    }

    #[test]
    fn test_empty_colony_reports_zero_energy() {
        let mut rng = fastrand::Rng::with_seed(4);
        let cfg = SimConfig { initial_ants: 0, ..SimConfig::default() };
        let world = World::new(cfg, &mut rng).unwrap();
        assert_eq!(TickStats::collect(&world, 0, TickEvents::default()).average_energy, 0.0);
    }

    #[test]
    fn test_events_accumulate() {
        let mut total = TickEvents::default();
        let tick = TickEvents { births: 2, deaths: 1, pickups: 3, deliveries: 4, food_relocations: 1 };
        total.accumulate(&tick);
        total.accumulate(&tick);
        assert_eq!(total.births, 4);
        assert_eq!(total.food_relocations, 2);
    }
}
