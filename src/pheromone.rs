//! Sparse, decaying trail field.
//!
//! Deposits are bucketed by the field age at which they expire, so a decay
//! pass only touches the deposits that actually run out. Strength is also
//! mirrored into a 2-D Fenwick tree, which answers quadrant sums in
//! `O(log W * log H)` no matter how many deposits exist.

use std::collections::BTreeMap;

use crate::direction::Quadrant;
use crate::geometry::{Bounds, Point};

/// Identity of one deposit, only used by the presentation hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepositId(pub u64);

#[derive(Clone, Debug)]
struct Deposit {
    id: DepositId,
    pos: Point,
    quantity: u32,
}

/// Read-only view of a live deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositView {
    pub id: DepositId,
    pub pos: Point,
    pub quantity: u32,
    /// Ticks left before the deposit is purged; always positive.
    pub life: u64,
}

/// Summed strength per cell, as a Fenwick tree over both axes.
#[derive(Clone, Debug)]
struct StrengthGrid {
    width: usize,
    height: usize,
    tree: Vec<i64>,
}

impl StrengthGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tree: vec![0; width * height],
        }
    }

    fn add(&mut self, x: usize, y: usize, delta: i64) {
        let mut i = x + 1;
        while i <= self.width {
            let mut j = y + 1;
            while j <= self.height {
                self.tree[(j - 1) * self.width + (i - 1)] += delta;
                j += j & j.wrapping_neg();
            }
            i += i & i.wrapping_neg();
        }
    }

    /// Sum over `[0, x) x [0, y)`.
    fn prefix(&self, x: usize, y: usize) -> i64 {
        let mut sum = 0;
        let mut i = x.min(self.width);
        while i > 0 {
            let mut j = y.min(self.height);
            while j > 0 {
                sum += self.tree[(j - 1) * self.width + (i - 1)];
                j -= j & j.wrapping_neg();
            }
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Sum over `[x0, x1) x [y0, y1)`.
    fn region(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> i64 {
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        self.prefix(x1, y1) - self.prefix(x0, y1) - self.prefix(x1, y0) + self.prefix(x0, y0)
    }
}

#[derive(Clone, Debug)]
pub struct PheromoneField {
    bounds: Bounds,
    /// Total decay applied so far; a deposit lives while `expires_at > age`.
    age: u64,
    next_id: u64,
    by_expiry: BTreeMap<u64, Vec<Deposit>>,
    strength: StrengthGrid,
    deposit_count: usize,
    total_strength: u64,
}

impl PheromoneField {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            age: 0,
            next_id: 0,
            by_expiry: BTreeMap::new(),
            strength: StrengthGrid::new(bounds.width as usize, bounds.height as usize),
            deposit_count: 0,
            total_strength: 0,
        }
    }

    /// Lay `quantity` units of trail at `pos` that survive `initial_life` decay steps.
    ///
    /// Returns `None` (and stores nothing) for empty or already-dead deposits
    /// and for positions outside the world.
    pub fn deposit(&mut self, pos: Point, quantity: u32, initial_life: u32) -> Option<DepositId> {
        if quantity == 0 || initial_life == 0 || !self.bounds.contains(pos) {
            return None;
        }

        let id = DepositId(self.next_id);
        self.next_id += 1;
        self.by_expiry
            .entry(self.age + u64::from(initial_life))
            .or_default()
            .push(Deposit { id, pos, quantity });
        self.strength.add(pos.x as usize, pos.y as usize, i64::from(quantity));
        self.deposit_count += 1;
        self.total_strength += u64::from(quantity);
        Some(id)
    }

    /// Age every deposit by `amount` and purge the exhausted ones.
    pub fn decay(&mut self, amount: u32) -> usize {
        self.decay_with(amount, |_, _| {})
    }

    /// Like [`decay`](Self::decay), reporting each purged deposit to `on_expire`.
    pub fn decay_with(&mut self, amount: u32, mut on_expire: impl FnMut(DepositId, Point)) -> usize {
        self.age += u64::from(amount);
        let mut purged = 0;
        while let Some(entry) = self.by_expiry.first_entry() {
            if *entry.key() > self.age {
                break;
            }
            for deposit in entry.remove() {
                self.strength
                    .add(deposit.pos.x as usize, deposit.pos.y as usize, -i64::from(deposit.quantity));
                self.total_strength -= u64::from(deposit.quantity);
                self.deposit_count -= 1;
                on_expire(deposit.id, deposit.pos);
                purged += 1;
            }
        }
        purged
    }

    /// Total trail strength inside `quadrant` as seen from `origin`.
    pub fn directional_density(&self, origin: Point, quadrant: Quadrant) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let (x0, x1, y0, y1) = quadrant.half_open(origin, self.bounds);
        self.strength
            .region(x0 as usize, x1 as usize, y0 as usize, y1 as usize)
            .max(0) as u64
    }

    pub fn strength_at(&self, pos: Point) -> u64 {
        if !self.bounds.contains(pos) {
            return 0;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        self.strength.region(x, x + 1, y, y + 1).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.deposit_count == 0
    }

    /// Number of live deposits.
    pub fn len(&self) -> usize {
        self.deposit_count
    }

    pub fn total_strength(&self) -> u64 {
        self.total_strength
    }

    pub fn iter(&self) -> impl Iterator<Item = DepositView> + '_ {
        self.by_expiry.iter().flat_map(move |(&expires_at, deposits)| {
            deposits.iter().map(move |d| DepositView {
                id: d.id,
                pos: d.pos,
                quantity: d.quantity,
                life: expires_at - self.age,
            })
        })
    }
}
