/// A position on the lattice, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Calculate Euclidean distance squared (avoid sqrt where possible)
    pub fn distance_squared(&self, other: &Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Calculate Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// A vertex of the grid graph.
///
/// `previous` is an index into the owning grid's vertex vector, recording
/// which vertex last relaxed this one. The shortest path is rebuilt by
/// walking these indices back from the destination.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Position,
    /// Tentative distance from the source; infinity until first relaxed
    pub distance: f64,
    pub visited: bool,
    /// Frontier marker: the single vertex processed on the next tick
    pub current: bool,
    /// Walls are impassable and count as visited from the start
    pub wall: bool,
    pub previous: Option<usize>,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Vertex {
            pos: Position::new(x, y),
            distance: f64::INFINITY,
            visited: false,
            current: false,
            wall: false,
            previous: None,
        }
    }

    /// Walls are never entered, so the search treats them as already visited
    pub fn is_visited(&self) -> bool {
        self.visited || self.wall
    }
}
