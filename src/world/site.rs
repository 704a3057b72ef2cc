use crate::geometry::{Point, Rect};
use crate::world::spatial::EntityId;

/// The colony's home. Fixed for the run and never destroyed.
#[derive(Clone, Debug)]
pub struct Nest {
    pub id: EntityId,
    pub pos: Point,
    pub radius: i32,
    food_storage: f64,
}

impl Nest {
    pub fn new(id: EntityId, pos: Point, radius: i32, food_storage: f64) -> Self {
        assert!(food_storage >= 0.0, "nest cannot start in debt");
        Self {
            id,
            pos,
            radius,
            food_storage,
        }
    }

    #[inline]
    pub fn food_storage(&self) -> f64 {
        self.food_storage
    }

    #[inline]
    pub fn footprint(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    /// Add delivered food.
    pub fn store(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0);
        self.food_storage += amount;
    }

    /// Hand out up to `wanted`, never more than is stored.
    pub fn withdraw(&mut self, wanted: f64) -> f64 {
        let amount = wanted.max(0.0).min(self.food_storage);
        self.food_storage -= amount;
        amount
    }

    /// Debit an amount the caller already knows is covered.
    ///
    /// # Panics
    /// If `amount` exceeds the stored food beyond rounding error.
    pub fn spend(&mut self, amount: f64) {
        let slack = f64::EPSILON * self.food_storage.max(1.0) * 4.0;
        assert!(
            amount <= self.food_storage + slack,
            "overdraw: spending {} with {} stored",
            amount,
            self.food_storage
        );
        self.food_storage = (self.food_storage - amount).max(0.0);
    }
}

/// A depleting food source. It is relocated, never destroyed, when emptied.
#[derive(Clone, Debug)]
pub struct Food {
    pub id: EntityId,
    pub pos: Point,
    pub radius: i32,
    life: u32,
    capacity: u32,
}

impl Food {
    pub fn new(id: EntityId, pos: Point, radius: i32, capacity: u32) -> Self {
        Self {
            id,
            pos,
            radius,
            life: capacity,
            capacity,
        }
    }

    /// Remaining visits before exhaustion
    #[inline]
    pub fn life(&self) -> u32 {
        self.life
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn footprint(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    /// Register one forager visit. Returns `true` when the source is now empty.
    pub fn consume(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life == 0
    }

    /// Move to `pos` with a full supply.
    pub fn relocate(&mut self, pos: Point) {
        self.pos = pos;
        self.life = self.capacity;
    }
}
