use crate::grid::Grid;
use crate::vertex::Position;

// Trace logging flag - set to true to enable per-tick debug output
const TRACE_SEARCH: bool = false;

/// Outcome of the search state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// A current vertex exists and the frontier can still advance
    Running,
    /// The destination was visited; the shortest path is available
    DestinationReached,
    /// No unvisited vertex has a finite distance - the destination is
    /// cut off by walls
    Unreachable,
}

/// Incremental single-source Dijkstra over a proximity grid.
///
/// The engine owns the grid and advances one current vertex per `tick`,
/// so an external frame loop can show the frontier spreading. Relaxation
/// only ever lowers a tentative distance, and the next current vertex is
/// always the unvisited minimum.
pub struct DijkstraSearch {
    pub grid: Grid,
    pub src: Position,
    pub dest: Position,
    state: SearchState,
    path: Option<Vec<Position>>,
    ticks: u64,
}

impl DijkstraSearch {
    /// Set up the search: the source vertex becomes current at distance 0,
    /// everything else stays unvisited at infinity.
    pub fn new(mut grid: Grid, src: Position, dest: Position) -> Self {
        if let Some(i) = grid.index_of(src) {
            grid.vertices[i].current = true;
            grid.vertices[i].distance = 0.0;
        }
        DijkstraSearch {
            grid,
            src,
            dest,
            state: SearchState::Running,
            path: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The shortest path in destination-to-source order, once reached
    pub fn path(&self) -> Option<&[Position]> {
        self.path.as_deref()
    }

    /// Number of ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the search by one step. Processes every vertex currently
    /// marked current (exactly one while running), then either halts in a
    /// terminal state or promotes the next frontier vertex. No-op once the
    /// search has halted.
    pub fn tick(&mut self) {
        if self.state != SearchState::Running {
            return;
        }
        self.ticks += 1;

        let current: Vec<usize> = (0..self.grid.len())
            .filter(|&i| self.grid.vertices[i].current)
            .collect();

        for ci in current {
            // Detach the current vertex before relaxing its neighbours.
            let c_pos = self.grid.vertices[ci].pos;
            let c_dist = self.grid.vertices[ci].distance;
            self.grid.vertices[ci].visited = true;
            self.grid.vertices[ci].current = false;

            let threshold = self.grid.neighbor_threshold();
            let mut relaxed = 0;
            for xi in 0..self.grid.len() {
                let d = c_pos.distance(&self.grid.vertices[xi].pos);
                if d <= 0.0 || d >= threshold {
                    continue;
                }
                let neighbor = &mut self.grid.vertices[xi];
                if neighbor.is_visited() {
                    continue;
                }
                let candidate = c_dist + d;
                if candidate < neighbor.distance {
                    neighbor.distance = candidate;
                    neighbor.previous = Some(ci);
                    relaxed += 1;
                }
            }

            if TRACE_SEARCH {
                println!(
                    "[tick {}] visited ({},{}) dist={:.2}, relaxed {} neighbours",
                    self.ticks, c_pos.x, c_pos.y, c_dist, relaxed
                );
            }

            if c_pos == self.dest {
                self.path = Some(trace_path(&self.grid, ci));
                self.state = SearchState::DestinationReached;
                return;
            }

            // Promote the unvisited vertex with the smallest tentative
            // distance. Several vertices may be tied at the minimum; the
            // strict comparison keeps the first in canonical order.
            let mut best: Option<(usize, f64)> = None;
            for (i, v) in self.grid.vertices.iter().enumerate() {
                if v.is_visited() {
                    continue;
                }
                match best {
                    Some((_, d)) if v.distance >= d => {}
                    _ => best = Some((i, v.distance)),
                }
            }
            match best {
                Some((i, d)) if d.is_finite() => {
                    self.grid.vertices[i].current = true;
                }
                // Nothing left to visit, or the remainder is cut off.
                _ => {
                    self.state = SearchState::Unreachable;
                    return;
                }
            }
        }
    }

    /// Total cost of the reconstructed path, once reached
    pub fn path_cost(&self) -> Option<f64> {
        self.grid
            .index_of(self.dest)
            .map(|i| self.grid.vertices[i].distance)
            .filter(|_| self.state == SearchState::DestinationReached)
    }
}

/// Walk `previous` links from the vertex at `from`, collecting positions
/// until a vertex with no predecessor (the source). The result runs from
/// `from` back to the source; reverse it for display.
///
/// Pure read over the predecessor chain, so repeated calls yield the same
/// sequence.
pub fn trace_path(grid: &Grid, from: usize) -> Vec<Position> {
    let mut path = vec![grid.vertices[from].pos];
    let mut cursor = grid.vertices[from].previous;
    while let Some(i) = cursor {
        path.push(grid.vertices[i].pos);
        cursor = grid.vertices[i].previous;
    }
    path
}
