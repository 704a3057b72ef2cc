use std::collections::HashMap;

use crate::geometry::{Bounds, Rect};

/// Stable identity of a tracked world entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Entity categories, declared in overlap precedence order (highest first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Nest = 0,
    Food = 1,
    Pheromone = 2,
    Agent = 3,
}

impl EntityKind {
    const COUNT: usize = 4;

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }

    /// Lower rank wins when several entities overlap the same spot.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            EntityKind::Nest => 0,
            EntityKind::Food => 1,
            EntityKind::Pheromone | EntityKind::Agent => 2,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    kind: EntityKind,
    rect: Rect,
    /// Position inside `members[kind]`, for O(1) removal.
    member_slot: usize,
}

/// Uniform-grid index of entity footprints.
///
/// Every entity is listed in each cell its footprint touches. Footprints may
/// stick out of the world; they are clipped to the outer cells.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    cell_size: i32,
    cols: i32,
    rows: i32,
    cells: Vec<Vec<EntityId>>,
    entries: HashMap<EntityId, Entry>,
    members: [Vec<EntityId>; EntityKind::COUNT],
}

impl SpatialIndex {
    pub fn new(bounds: Bounds, cell_size: i32) -> Self {
        debug_assert!(cell_size > 0);
        let cols = (bounds.width + cell_size - 1) / cell_size;
        let rows = (bounds.height + cell_size - 1) / cell_size;
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); (cols * rows) as usize],
            entries: HashMap::new(),
            members: Default::default(),
        }
    }

    /// Inclusive cell span `(cx0, cy0, cx1, cy1)` covered by `rect`.
    #[inline]
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let cell = |v: i32, max: i32| v.div_euclid(self.cell_size).clamp(0, max - 1);
        (
            cell(rect.min_x, self.cols),
            cell(rect.min_y, self.rows),
            cell(rect.max_x, self.cols),
            cell(rect.max_y, self.rows),
        )
    }

    #[inline]
    fn cell_index(&self, cx: i32, cy: i32) -> usize {
        (cy * self.cols + cx) as usize
    }

    fn link(&mut self, id: EntityId, rect: &Rect) {
        let (cx0, cy0, cx1, cy1) = self.span(rect);
        for cy in cy0..=cy1 {
            for cx in cx0..=cx1 {
                let idx = self.cell_index(cx, cy);
                self.cells[idx].push(id);
            }
        }
    }

    fn unlink(&mut self, id: EntityId, rect: &Rect) {
        let (cx0, cy0, cx1, cy1) = self.span(rect);
        for cy in cy0..=cy1 {
            for cx in cx0..=cx1 {
                let idx = self.cell_index(cx, cy);
                let bucket = &mut self.cells[idx];
                if let Some(pos) = bucket.iter().position(|&e| e == id) {
                    bucket.swap_remove(pos);
                }
            }
        }
    }

    /// Start tracking `id`. Re-inserting an id replaces its previous entry.
    pub fn insert(&mut self, id: EntityId, kind: EntityKind, rect: Rect) {
        if self.entries.contains_key(&id) {
            self.remove(id);
        }
        let members = &mut self.members[kind.slot()];
        let member_slot = members.len();
        members.push(id);
        self.link(id, &rect);
        self.entries.insert(id, Entry { kind, rect, member_slot });
    }

    /// Stop tracking `id`, returning its last footprint.
    pub fn remove(&mut self, id: EntityId) -> Option<Rect> {
        let entry = self.entries.remove(&id)?;
        self.unlink(id, &entry.rect);

        let members = &mut self.members[entry.kind.slot()];
        members.swap_remove(entry.member_slot);
        if let Some(&moved) = members.get(entry.member_slot) {
            if let Some(e) = self.entries.get_mut(&moved) {
                e.member_slot = entry.member_slot;
            }
        }
        Some(entry.rect)
    }

    /// Replace the footprint of a tracked entity. Returns `false` if unknown.
    pub fn move_to(&mut self, id: EntityId, rect: Rect) -> bool {
        let Some(old) = self.entries.get(&id).map(|e| e.rect) else {
            return false;
        };
        if self.span(&old) != self.span(&rect) {
            self.unlink(id, &old);
            self.link(id, &rect);
        }
        if let Some(e) = self.entries.get_mut(&id) {
            e.rect = rect;
        }
        true
    }

    /// Visit every entity whose footprint intersects `rect`, once each.
    fn for_each_overlapping(&self, rect: &Rect, mut visit: impl FnMut(EntityId, &Entry)) {
        let (qx0, qy0, qx1, qy1) = self.span(rect);
        for cy in qy0..=qy1 {
            for cx in qx0..=qx1 {
                for &id in &self.cells[self.cell_index(cx, cy)] {
                    let Some(entry) = self.entries.get(&id) else {
                        continue;
                    };
                    // An entity spanning several cells is reported only from
                    // the first cell shared by its span and the query span.
                    let (ex0, ey0, _, _) = self.span(&entry.rect);
                    if cx != ex0.max(qx0) || cy != ey0.max(qy0) {
                        continue;
                    }
                    if entry.rect.intersects(rect) {
                        visit(id, entry);
                    }
                }
            }
        }
    }

    /// All entities overlapping `rect`, sorted by id.
    pub fn query_rect(&self, rect: Rect) -> Vec<EntityId> {
        let mut found = Vec::new();
        self.for_each_overlapping(&rect, |id, _| found.push(id));
        found.sort_unstable();
        found
    }

    /// Number of `kind` entities overlapping `rect`.
    ///
    /// Scans whichever is smaller: the members of `kind` or the grid cells
    /// under `rect`.
    pub fn count_in_rect(&self, rect: Rect, kind: EntityKind) -> usize {
        let members = &self.members[kind.slot()];
        let (cx0, cy0, cx1, cy1) = self.span(&rect);
        let cells = ((cx1 - cx0 + 1) * (cy1 - cy0 + 1)) as usize;

        if members.len() <= cells {
            members
                .iter()
                .filter(|id| self.entries.get(*id).is_some_and(|e| e.rect.intersects(&rect)))
                .count()
        } else {
            let mut count = 0;
            self.for_each_overlapping(&rect, |_, e| count += (e.kind == kind) as usize);
            count
        }
    }

    /// Highest-precedence entity overlapping `rect`, ignoring `exclude`.
    /// Ties within a rank go to the lowest id.
    pub fn top_overlapping(&self, rect: Rect, exclude: Option<EntityId>) -> Option<(EntityId, EntityKind)> {
        let mut best: Option<(u8, EntityId, EntityKind)> = None;
        self.for_each_overlapping(&rect, |id, e| {
            if Some(id) == exclude {
                return;
            }
            let key = (e.kind.rank(), id, e.kind);
            if best.map_or(true, |b| (key.0, key.1) < (b.0, b.1)) {
                best = Some(key);
            }
        });
        best.map(|(_, id, kind)| (id, kind))
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entries.get(&id).map(|e| e.kind)
    }

    pub fn footprint(&self, id: EntityId) -> Option<Rect> {
        self.entries.get(&id).map(|e| e.rect)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
