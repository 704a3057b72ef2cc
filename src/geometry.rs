use serde::Deserialize;

use crate::direction::Direction;

/// Integer position on the world plane. `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point reached by walking `distance` unit moves in `direction`.
    /// Diagonals use the same per-axis magnitude as axis moves.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

/// Inclusive axis-aligned rectangle: `min_x..=max_x` by `min_y..=max_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Rectangle spanned by two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Bounding box of a circle-like footprint.
    #[inline]
    pub fn around(center: Point, radius: i32) -> Self {
        Self {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    #[inline]
    pub fn point(p: Point) -> Self {
        Self::around(p, 0)
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Fixed world extent `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Nearest in-bounds point.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0, self.width - 1), p.y.clamp(0, self.height - 1))
    }

    /// True when the point sits on (or past) an edge of the world.
    #[inline]
    pub fn on_edge(&self, p: Point) -> bool {
        p.x <= 0 || p.y <= 0 || p.x >= self.width - 1 || p.y >= self.height - 1
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection_is_inclusive() {
        let a = Rect::around(Point::new(10, 10), 2);
        let touching = Rect::around(Point::new(14, 10), 2);
        let apart = Rect::around(Point::new(15, 10), 2);

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(9, 2), Point::new(1, 7));
        assert_eq!(r, Rect { min_x: 1, min_y: 2, max_x: 9, max_y: 7 });
        assert!(r.contains(Point::new(1, 7)));
    }

    #[test]
    fn test_bounds_clamp_and_edges() {
        let b = Bounds::new(100, 50);

        assert_eq!(b.clamp(Point::new(-4, 60)), Point::new(0, 49));
        assert!(b.on_edge(Point::new(0, 20)));
        assert!(b.on_edge(Point::new(99, 20)));
        assert!(!b.on_edge(Point::new(50, 20)));
        assert!(!b.contains(Point::new(100, 0)));
    }

    #[test]
    fn test_offset_uses_same_magnitude_for_diagonals() {
        let p = Point::new(20, 20);
        assert_eq!(p.offset(Direction::East, 7), Point::new(27, 20));
        assert_eq!(p.offset(Direction::NorthWest, 7), Point::new(13, 13));
    }
}
