use crate::geometry::{Bounds, Point, Rect};

/// The eight unit moves an ant can take each tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    South = 1,
    SouthEast = 2,
    West = 3,
    North = 4,
    NorthWest = 5,
    NorthEast = 6,
    SouthWest = 7,
}

impl Direction {
    /// All possible directions
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::South,
        Direction::SouthEast,
        Direction::West,
        Direction::North,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
    ];

    /// Get direction index for array indexing
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit offset `(dx, dy)`; north is towards `y = 0`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Get direction name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::South => "south",
            Direction::SouthEast => "south-east",
            Direction::West => "west",
            Direction::North => "north",
            Direction::NorthWest => "north-west",
            Direction::NorthEast => "north-east",
            Direction::SouthWest => "south-west",
        }
    }
}

/// One of the four regions of the world split at a reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// The three moves that head into this quadrant.
    pub const fn directions(self) -> [Direction; 3] {
        match self {
            Quadrant::UpperLeft => [Direction::West, Direction::North, Direction::NorthWest],
            Quadrant::UpperRight => [Direction::East, Direction::North, Direction::NorthEast],
            Quadrant::LowerLeft => [Direction::West, Direction::South, Direction::SouthWest],
            Quadrant::LowerRight => [Direction::East, Direction::South, Direction::SouthEast],
        }
    }

    /// Half-open cell ranges `(x0..x1, y0..y1)` of this quadrant around `origin`.
    ///
    /// The four ranges partition the world: cells on the origin's column or
    /// row belong to the right / lower side, so nothing is counted twice.
    pub fn half_open(self, origin: Point, bounds: Bounds) -> (i32, i32, i32, i32) {
        let ox = origin.x.clamp(0, bounds.width);
        let oy = origin.y.clamp(0, bounds.height);
        match self {
            Quadrant::UpperLeft => (0, ox, 0, oy),
            Quadrant::UpperRight => (ox, bounds.width, 0, oy),
            Quadrant::LowerLeft => (0, ox, oy, bounds.height),
            Quadrant::LowerRight => (ox, bounds.width, oy, bounds.height),
        }
    }

    /// Closed rectangle from the matching world corner to `origin`, the
    /// region an overlap search would scan.
    pub fn corner_rect(self, origin: Point, bounds: Bounds) -> Rect {
        let right = bounds.width - 1;
        let bottom = bounds.height - 1;
        let corner = match self {
            Quadrant::UpperLeft => Point::new(0, 0),
            Quadrant::UpperRight => Point::new(right, 0),
            Quadrant::LowerLeft => Point::new(0, bottom),
            Quadrant::LowerRight => Point::new(right, bottom),
        };
        Rect::from_corners(corner, origin)
    }
}
