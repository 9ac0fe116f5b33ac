use crate::point::Corner;

/// Facing of the boundary tracer, and the direction of axis-aligned rays
///
/// The map is drawn with +x to the east (right) and +z to the south (down),
/// so turning right from `PlusX` faces `PlusZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    PlusX,  // x++
    PlusZ,  // z++
    MinusX, // x--
    MinusZ, // z--
}

impl Direction {
    /// Ray order used when searching for cutouts
    pub const ALL: [Direction; 4] = [Direction::PlusX, Direction::MinusX, Direction::PlusZ, Direction::MinusZ];

    /// Unit step `(dx, dz)`
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::PlusX => (1, 0),
            Direction::PlusZ => (0, 1),
            Direction::MinusX => (-1, 0),
            Direction::MinusZ => (0, -1),
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::PlusX => Direction::PlusZ,
            Direction::PlusZ => Direction::MinusX,
            Direction::MinusX => Direction::MinusZ,
            Direction::MinusZ => Direction::PlusX,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Direction::PlusX => Direction::MinusZ,
            Direction::MinusZ => Direction::MinusX,
            Direction::MinusX => Direction::PlusZ,
            Direction::PlusZ => Direction::PlusX,
        }
    }
}

/// An axis-aligned edge of a traced ring
///
/// Rings produced by the tracer only ever turn by 90 degrees, so every edge is
/// either horizontal (constant z) or vertical (constant x).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    start: Corner,
    end: Corner,
}

impl Edge {
    pub fn new(start: Corner, end: Corner) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Corner {
        self.start
    }

    pub fn end(&self) -> Corner {
        self.end
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.z == self.end.z
    }

    /// Where a ray cast from `origin` towards `direction` meets this edge
    ///
    /// Returns the hit point and its distance from `origin`. Only edges
    /// perpendicular to the ray are considered; a collinear edge is always
    /// reached through one of its perpendicular neighbours first. Hits at zero
    /// distance or behind the origin are rejected. Edge endpoints count as hits.
    pub fn ray_hit(&self, origin: Corner, direction: Direction) -> Option<(Corner, i32)> {
        match direction {
            Direction::PlusX | Direction::MinusX => {
                if !self.is_vertical() || self.start == self.end {
                    return None;
                }
                let (lo, hi) = min_max(self.start.z, self.end.z);
                if origin.z < lo || origin.z > hi {
                    return None;
                }
                let distance = if direction == Direction::PlusX {
                    self.start.x - origin.x
                } else {
                    origin.x - self.start.x
                };
                (distance > 0).then(|| (Corner::new(self.start.x, origin.z), distance))
            }
            Direction::PlusZ | Direction::MinusZ => {
                if !self.is_horizontal() || self.start == self.end {
                    return None;
                }
                let (lo, hi) = min_max(self.start.x, self.end.x);
                if origin.x < lo || origin.x > hi {
                    return None;
                }
                let distance = if direction == Direction::PlusZ {
                    self.start.z - origin.z
                } else {
                    origin.z - self.start.z
                };
                (distance > 0).then(|| (Corner::new(origin.x, self.start.z), distance))
            }
        }
    }
}

fn min_max(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Edges of a closed ring, including the implicit closing edge
pub fn ring_edges(ring: &[Corner]) -> impl Iterator<Item = Edge> + '_ {
    let n = ring.len();
    (0..n).map(move |i| Edge::new(ring[i], ring[(i + 1) % n]))
}
