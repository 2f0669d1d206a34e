use rand::Rng;

use crate::config::Config;
use crate::dijkstra::DijkstraSearch;
use crate::grid::Grid;
use crate::vertex::Position;

/// Pick a random source and a random, distinct destination.
///
/// Only the two positions are exposed; callers match vertices by
/// coordinate, never by identity.
pub fn pick_endpoints(grid: &Grid, rng: &mut impl Rng) -> (Position, Position) {
    let mut pool: Vec<Position> = grid.vertices.iter().map(|v| v.pos).collect();
    let src = pool.remove(rng.gen_range(0..pool.len()));
    let dest = pool[rng.gen_range(0..pool.len())];
    (src, dest)
}

/// Turn a random subset of vertices into walls. Each non-terminal vertex
/// becomes a wall with probability `1 / wall_chance`; the source and
/// destination are never walls.
pub fn scatter_walls(grid: &mut Grid, src: Position, dest: Position, wall_chance: u32, rng: &mut impl Rng) {
    for v in grid.vertices.iter_mut() {
        if v.pos != src && v.pos != dest && rng.gen_range(0..wall_chance) == 0 {
            v.wall = true;
        }
    }
}

/// Build a ready-to-run search from the configuration: validate, generate
/// the lattice, pick the terminals, scatter walls.
///
/// Fails fast on degenerate configurations, including a spacing so large
/// that the lattice has fewer than the two vertices needed for source and
/// destination.
pub fn build_search(config: &Config, rng: &mut impl Rng) -> Result<DijkstraSearch, Box<dyn std::error::Error>> {
    config.validate()?;

    let mut grid = Grid::generate(config.grid.width, config.grid.height, config.grid.spacing);
    if grid.len() < 2 {
        return Err(format!(
            "grid {}x{} with spacing {} yields only {} vertex(es); need at least 2",
            config.grid.width,
            config.grid.height,
            config.grid.spacing,
            grid.len()
        )
        .into());
    }

    let (src, dest) = pick_endpoints(&grid, rng);
    scatter_walls(&mut grid, src, dest, config.search.wall_chance, rng);

    Ok(DijkstraSearch::new(grid, src, dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn endpoints_are_distinct() {
        let grid = Grid::generate(200, 200, 20);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (src, dest) = pick_endpoints(&grid, &mut rng);
            assert_ne!(src, dest, "seed {} picked equal endpoints", seed);
        }
    }

    #[test]
    fn terminals_are_never_walls() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::generate(200, 200, 20);
            let (src, dest) = pick_endpoints(&grid, &mut rng);
            // wall_chance of 1 turns every eligible vertex into a wall
            scatter_walls(&mut grid, src, dest, 1, &mut rng);

            for v in &grid.vertices {
                if v.pos == src || v.pos == dest {
                    assert!(!v.wall);
                } else {
                    assert!(v.wall);
                }
            }
        }
    }

    #[test]
    fn build_search_rejects_degenerate_spacing() {
        let mut config = Config::default();
        // One step per axis at most: a single vertex, no room for terminals
        config.grid.width = 10;
        config.grid.height = 10;
        config.grid.spacing = 100;
        let mut rng = StdRng::seed_from_u64(0);
        assert!(build_search(&config, &mut rng).is_err());
    }

    #[test]
    fn build_search_starts_at_source() {
        let config = Config::default();
        let mut rng = StdRng::seed_from_u64(7);
        let search = build_search(&config, &mut rng).expect("default config should build");

        let current: Vec<_> = search.grid.vertices.iter().filter(|v| v.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].pos, search.src);
        assert_eq!(current[0].distance, 0.0);
    }
}
