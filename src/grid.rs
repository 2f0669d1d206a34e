use crate::vertex::{Position, Vertex};

/// Multiplier applied to the lattice spacing when deciding which vertices
/// count as neighbours. 1.5 admits the diagonals (sqrt(2) ~= 1.414).
pub const NEIGHBOR_THRESHOLD: f64 = 1.5;

/// The grid graph: all vertices in canonical (generation) order.
///
/// There are no explicit edges; two vertices are neighbours when their
/// Euclidean distance is below `NEIGHBOR_THRESHOLD * spacing`.
#[derive(Clone)]
pub struct Grid {
    pub spacing: i32,
    pub vertices: Vec<Vertex>,
}

impl Grid {
    /// Generate the lattice for a `width` x `height` viewport, inset 10%
    /// from each edge, with vertices every `spacing` pixels. The far edge
    /// is included when it lands exactly on a step boundary.
    pub fn generate(width: i32, height: i32, spacing: i32) -> Self {
        let mut vertices = Vec::new();
        let x_end = (width as f64 * 0.9 + spacing as f64) as i32;
        let y_end = (height as f64 * 0.9 + spacing as f64) as i32;
        let mut x = (width as f64 * 0.1) as i32;
        while x < x_end {
            let mut y = (height as f64 * 0.1) as i32;
            while y < y_end {
                vertices.push(Vertex::new(x, y));
                y += spacing;
            }
            x += spacing;
        }
        Grid { spacing, vertices }
    }

    /// Distance below which two distinct vertices are neighbours
    pub fn neighbor_threshold(&self) -> f64 {
        NEIGHBOR_THRESHOLD * self.spacing as f64
    }

    /// Index of the vertex at exactly `pos`, if any
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.vertices.iter().position(|v| v.pos == pos)
    }

    /// Indices of all lattice neighbours of the vertex at `index`
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let origin = self.vertices[index].pos;
        let threshold = self.neighbor_threshold();
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                let d = origin.distance(&v.pos);
                d > 0.0 && d < threshold
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
