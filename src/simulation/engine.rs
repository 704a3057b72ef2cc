use crate::ant::Mode;
use crate::events::{Change, EntityUpdate, EventSink, NullSink, VisualState};
use crate::geometry::Point;
use crate::simulation::collision::{self, Contact};
use crate::simulation::economy;
use crate::simulation::movement;
use crate::simulation::stats::{TickEvents, TickStats};
use crate::world::spatial::EntityKind;
use crate::world::World;
use colored::Colorize;
use std::time::{Duration, Instant};

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The colony is alive; statistics as of the end of the tick.
    Running(TickStats),
    /// No ants are left. Terminal: every later tick returns the same snapshot.
    Extinct(TickStats),
}

impl TickOutcome {
    pub fn stats(&self) -> &TickStats {
        match self {
            TickOutcome::Running(s) | TickOutcome::Extinct(s) => s,
        }
    }

    pub fn is_extinct(&self) -> bool {
        matches!(self, TickOutcome::Extinct(_))
    }
}

/// How a whole run ended.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub extinct: bool,
    pub last: TickStats,
    pub totals: TickEvents,
    pub elapsed: Duration,
}

/// The simulation clock: owns the world and the random source and advances
/// both one discrete tick at a time. It never sleeps or paces itself.
pub struct SimulationEngine {
    world: World,
    rng: fastrand::Rng,
    tick: u64,
    extinct: bool,
    last: TickStats,
    totals: TickEvents,
}

impl SimulationEngine {
    /// Create a new simulation engine
    pub fn new(world: World, rng: fastrand::Rng) -> Self {
        let last = TickStats::collect(&world, 0, TickEvents::default());
        Self {
            world,
            rng,
            tick: 0,
            extinct: false,
            last,
            totals: TickEvents::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for setting up scenarios between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_extinct(&self) -> bool {
        self.extinct
    }

    /// Latest statistics snapshot.
    pub fn stats(&self) -> &TickStats {
        &self.last
    }

    /// Totals across every tick so far.
    pub fn totals(&self) -> &TickEvents {
        &self.totals
    }

    /// Advance one tick without a presentation layer.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_with(&mut NullSink)
    }

    /// Advance one tick: decay trail, breed, check for extinction, then step
    /// every live ant in creation order and snapshot the statistics.
    pub fn tick_with(&mut self, sink: &mut dyn EventSink) -> TickOutcome {
        if self.extinct {
            return TickOutcome::Extinct(self.last.clone());
        }
        self.tick += 1;
        let constrained = self.world.config().resource_constrained;
        let mut events = TickEvents::default();

        self.world.pheromones.decay_with(1, |id, pos| {
            sink.emit(EntityUpdate {
                entity_id: id.0,
                kind: EntityKind::Pheromone,
                position: pos,
                visual_state: VisualState::Trail,
                change: Change::Removed,
            })
        });

        if constrained {
            events.births = economy::reproduce(&mut self.world, sink);
        }

        if self.world.ants.is_empty() {
            self.extinct = true;
            self.finish_tick(events);
            tracing::info!(tick = self.tick, "colony extinct");
            return TickOutcome::Extinct(self.last.clone());
        }

        if constrained {
            economy::burn_energy(&mut self.world);
            events.deaths = economy::starvation_sweep(&mut self.world, sink);
        }

        for idx in 0..self.world.ants.len() {
            self.step_ant(idx, &mut events, sink);
        }

        self.finish_tick(events);
        TickOutcome::Running(self.last.clone())
    }

    fn finish_tick(&mut self, events: TickEvents) {
        self.totals.accumulate(&events);
        self.last = TickStats::collect(&self.world, self.tick, events);
    }

    /// Move one ant and apply whatever it lands on.
    fn step_ant(&mut self, idx: usize, events: &mut TickEvents, sink: &mut dyn EventSink) {
        let world = &mut self.world;
        let rng = &mut self.rng;
        let direction = movement::choose_direction(world, &world.ants[idx], rng);

        let cfg = world.config();
        let (step, ant_radius) = (cfg.step_size, cfg.ant_radius);
        let from = world.ants[idx].pos;

        if world.ants[idx].mode == Mode::Returning {
            let (chance, quantity, life) = (
                cfg.trail_deposit_chance,
                cfg.trail_deposit_quantity,
                cfg.pheromone_life,
            );
            for i in 0..step {
                if rng.f64() < chance {
                    let spot = world.bounds.clamp(from.offset(direction, i));
                    lay_trail(world, spot, quantity, life, sink);
                }
            }
        }

        let to = world.bounds.clamp(from.offset(direction, step));
        let ant = &mut world.ants[idx];
        ant.pos = to;
        world.index.move_to(ant.id, ant.footprint(ant_radius));
        sink.emit(agent_update(ant.id.0, to, ant.visual_state(), Change::Moved));

        match (ant.mode, collision::detect(&world.index, ant, ant_radius)) {
            (Mode::Scouting, Contact::Food) => {
                events.pickups += 1;
                if self.pick_up(idx, sink) {
                    events.food_relocations += 1;
                }
            }
            (Mode::Returning, Contact::Nest) => {
                self.deliver(idx, sink);
                events.deliveries += 1;
            }
            _ => {}
        }
    }

    /// Scout reached food: take a visit, turn for home, refuel and mark the spot.
    /// Returns whether the source ran dry and was moved.
    fn pick_up(&mut self, idx: usize, sink: &mut dyn EventSink) -> bool {
        let world = &mut self.world;
        let exhausted = world.food.consume();
        if exhausted {
            let pos = world.relocate_food(&mut self.rng);
            tracing::debug!(pos = ?pos, "food source relocated");
            sink.emit(EntityUpdate {
                entity_id: world.food.id.0,
                kind: EntityKind::Food,
                position: pos,
                visual_state: VisualState::Food,
                change: Change::Moved,
            });
        }

        let (constrained, max_energy, batch, life) = {
            let cfg = world.config();
            (cfg.resource_constrained, cfg.max_energy, cfg.pheromone_batch, cfg.pheromone_life)
        };
        let ant = &mut world.ants[idx];
        ant.mode = Mode::Returning;
        if constrained {
            economy::feed(&mut world.nest, ant, max_energy);
        } else {
            let deficit = ant.deficit(max_energy);
            ant.refill(deficit);
        }
        tracing::trace!(ant = ant.id.0, pos = ?ant.pos, "picked up food");
        sink.emit(agent_update(ant.id.0, ant.pos, ant.visual_state(), Change::Restyled));

        let spot = ant.pos;
        lay_trail(world, spot, batch, life, sink);
        exhausted
    }

    /// Forager reached the nest: drop the food and refuel.
    fn deliver(&mut self, idx: usize, sink: &mut dyn EventSink) {
        let world = &mut self.world;
        let (constrained, max_energy) = {
            let cfg = world.config();
            (cfg.resource_constrained, cfg.max_energy)
        };
        world.nest.store(economy::FOOD_PER_DELIVERY);

        let ant = &mut world.ants[idx];
        ant.mode = Mode::Scouting;
        if constrained {
            economy::feed(&mut world.nest, ant, max_energy);
        }
        tracing::trace!(ant = ant.id.0, storage = world.nest.food_storage(), "delivered food");
        sink.emit(agent_update(ant.id.0, ant.pos, ant.visual_state(), Change::Restyled));
    }

    /// Run until `max_ticks` ticks have passed or the colony dies out.
    /// Every `report_every` ticks (0 disables) a statistics line is printed.
    pub fn run_simulation(
        &mut self,
        max_ticks: u64,
        report_every: u64,
        sink: &mut dyn EventSink,
    ) -> RunSummary {
        let sim_start = Instant::now();
        let mut extinct = self.extinct;

        while !extinct && self.tick < max_ticks {
            let outcome = self.tick_with(sink);
            extinct = outcome.is_extinct();
            if report_every > 0 && (self.tick % report_every == 0 || extinct) {
                print_tick(outcome.stats());
            }
        }

        if extinct {
            tracing::info!(tick = self.tick, "run ended: colony extinct");
        } else {
            tracing::info!(tick = self.tick, ants = self.last.live_agents, "run ended: tick limit");
        }

        RunSummary {
            ticks: self.tick,
            extinct,
            last: self.last.clone(),
            totals: self.totals,
            elapsed: sim_start.elapsed(),
        }
    }

    /// Print simulation summary
    pub fn print_summary(&self, summary: &RunSummary) {
        let outcome = if summary.extinct {
            "outcome=extinct".red().bold()
        } else {
            "outcome=completed".green().bold()
        };
        println!(
            "\n{}\n{} {:.3} ms {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            summary.elapsed.as_secs_f64() * 1000.0,
            "|".dimmed(),
            format!("ticks={}", summary.ticks).cyan(),
            format!("ants={}", summary.last.live_agents).cyan(),
            outcome,
        );
        println!(
            "{} {} {} {}",
            format!("storage={:.1}", summary.last.food_storage).cyan(),
            format!("food_life={}", summary.last.food_life).cyan(),
            format!(
                "pheromones={} trail_strength={}",
                summary.last.pheromone_count, summary.last.pheromone_strength
            )
            .cyan(),
            format!("avg_energy={:.1}", summary.last.average_energy).cyan(),
        );
        println!(
            "{} {} {} {} {}",
            format!("births={}", summary.totals.births).yellow(),
            format!("deaths={}", summary.totals.deaths).yellow(),
            format!("pickups={}", summary.totals.pickups).yellow(),
            format!("deliveries={}", summary.totals.deliveries).yellow(),
            format!("relocations={}", summary.totals.food_relocations).yellow(),
        );
    }
}

fn agent_update(id: u64, position: Point, visual_state: VisualState, change: Change) -> EntityUpdate {
    EntityUpdate {
        entity_id: id,
        kind: EntityKind::Agent,
        position,
        visual_state,
        change,
    }
}

fn lay_trail(world: &mut World, spot: Point, quantity: u32, life: u32, sink: &mut dyn EventSink) {
    if let Some(id) = world.pheromones.deposit(spot, quantity, life) {
        sink.emit(EntityUpdate {
            entity_id: id.0,
            kind: EntityKind::Pheromone,
            position: spot,
            visual_state: VisualState::Trail,
            change: Change::Created,
        });
    }
}

fn print_tick(stats: &TickStats) {
    println!(
        "{} {} {} {} {} {}",
        format!("tick={}", stats.tick).bright_blue(),
        format!("ants={}", stats.live_agents).cyan(),
        format!("returning={}", stats.returning).cyan(),
        format!("avg_energy={:.1}", stats.average_energy).cyan(),
        format!("storage={:.1}", stats.food_storage).cyan(),
        format!("food_life={} pheromones={}", stats.food_life, stats.pheromone_count).dimmed(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn engine(cfg: SimConfig, seed: u64) -> SimulationEngine {
        let mut rng = fastrand::Rng::with_seed(seed);
        let world = World::new(cfg, &mut rng).unwrap();
        SimulationEngine::new(world, rng)
    }

    fn base() -> SimConfig {
        SimConfig {
            initial_ants: 10,
            nest: Some(Point::new(100, 100)),
            food: Some(Point::new(400, 400)),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_tick_advances_clock_and_moves_ants() {
        let mut eng = engine(base(), 1);
        let outcome = eng.tick();

        assert!(!outcome.is_extinct());
        assert_eq!(eng.tick_count(), 1);
        assert_eq!(outcome.stats().tick, 1);
        assert_eq!(outcome.stats().live_agents, 10);
        let step = eng.world().config().step_size;
        for ant in &eng.world().ants {
            let dx = (ant.pos.x - 100).abs();
            let dy = (ant.pos.y - 100).abs();
            assert!(dx == step || dy == step, "ant at {:?}", ant.pos);
            assert_eq!(eng.world().index.footprint(ant.id), Some(ant.footprint(2)));
        }
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let mut a = engine(base(), 77);
        let mut b = engine(base(), 77);
        for _ in 0..300 {
            assert_eq!(a.tick(), b.tick());
        }
        let pa: Vec<_> = a.world().ants.iter().map(|x| x.pos).collect();
        let pb: Vec<_> = b.world().ants.iter().map(|x| x.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_extinction_is_terminal() {
        let cfg = SimConfig {
            initial_ants: 2,
            resource_constrained: true,
            initial_energy: 2.0,
            max_energy: 2.0,
            ..base()
        };
        let mut eng = engine(cfg, 5);

        assert!(!eng.tick().is_extinct());
        let second = eng.tick();
        assert!(!second.is_extinct());
        assert_eq!(second.stats().live_agents, 0);
        assert_eq!(second.stats().events.deaths, 2);

        let third = eng.tick();
        assert!(third.is_extinct());
        assert_eq!(eng.tick_count(), 3);

        let again = eng.tick();
        assert_eq!(again, third);
        assert_eq!(eng.tick_count(), 3);
    }

    #[test]
    fn test_ants_without_economy_never_starve() {
        let cfg = SimConfig { initial_energy: 1.0, max_energy: 1.0, ..base() };
        let mut eng = engine(cfg, 2);
        for _ in 0..50 {
            eng.tick();
        }
        assert_eq!(eng.world().live_ants(), 10);
    }

    #[test]
    fn test_sink_sees_every_move() {
        let mut eng = engine(base(), 3);
        let mut updates: Vec<EntityUpdate> = Vec::new();
        eng.tick_with(&mut updates);
        let moves = updates
            .iter()
            .filter(|u| u.kind == EntityKind::Agent && u.change == Change::Moved)
            .count();
        assert_eq!(moves, 10);
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let mut eng = engine(base(), 4);
        let summary = eng.run_simulation(25, 0, &mut NullSink);
        assert_eq!(summary.ticks, 25);
        assert!(!summary.extinct);
        assert_eq!(summary.last.tick, 25);
    }
}
