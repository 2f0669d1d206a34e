use arboard::Clipboard;
use macroquad::prelude::*;
// The macroquad prelude re-exports quad_rand under the name `rand`; the
// leading `::` pins these imports to the real rand crate.
use ::rand::{thread_rng, Rng};
use pathviz::config::Config;
use pathviz::dijkstra::{DijkstraSearch, SearchState};
use pathviz::setup::build_search;
use pathviz::vertex::{Position, Vertex};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// The window configuration runs before `main`, so both read the config
/// through a shared cell.
fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.width,
        window_height: config.grid.height,
        ..Default::default()
    }
}

/// Application state: the search engine plus the tick clock that gates it
struct App {
    search: DijkstraSearch,
    tick_interval: f32,
    tick_acc: f32,
    delay_left: f32,
}

impl App {
    fn new(config: &Config, rng: &mut impl Rng) -> Result<Self, Box<dyn std::error::Error>> {
        let search = build_search(config, rng)?;
        println!(
            "Source ({},{}) -> destination ({},{}), {} vertices",
            search.src.x,
            search.src.y,
            search.dest.x,
            search.dest.y,
            search.grid.len()
        );
        Ok(App {
            search,
            tick_interval: 1.0 / config.search.ticks_per_second,
            tick_acc: 0.0,
            delay_left: config.search.start_delay_secs,
        })
    }

    /// Advance the engine at the configured tick rate. The frame clock
    /// accumulates here; the engine itself never reads time.
    fn update(&mut self) {
        if self.search.state() != SearchState::Running {
            return;
        }
        let dt = get_frame_time();
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            return;
        }
        self.tick_acc += dt;
        while self.tick_acc >= self.tick_interval {
            self.tick_acc -= self.tick_interval;
            self.search.tick();
            match self.search.state() {
                SearchState::DestinationReached => {
                    println!("Destination reached!");
                    if let Some(cost) = self.search.path_cost() {
                        println!("Distance to source is: {:.2}", cost);
                    }
                    break;
                }
                SearchState::Unreachable => {
                    println!("Destination unreachable");
                    break;
                }
                SearchState::Running => {}
            }
        }
    }

    fn copy_to_clipboard(&self) {
        let layout = scene_to_string(&self.search);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Scene layout copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }
}

/// ASCII rendering of the scene, row by row:
/// s = source, d = destination, ■ = wall, o = visited, * = path, □ = untouched
fn scene_to_string(search: &DijkstraSearch) -> String {
    let grid = &search.grid;
    let by_pos: HashMap<Position, &Vertex> = grid.vertices.iter().map(|v| (v.pos, v)).collect();
    let on_path: HashSet<Position> = search
        .path()
        .map(|p| p.iter().copied().collect())
        .unwrap_or_default();

    let min_x = grid.vertices.iter().map(|v| v.pos.x).min().unwrap_or(0);
    let max_x = grid.vertices.iter().map(|v| v.pos.x).max().unwrap_or(0);
    let min_y = grid.vertices.iter().map(|v| v.pos.y).min().unwrap_or(0);
    let max_y = grid.vertices.iter().map(|v| v.pos.y).max().unwrap_or(0);

    let mut result = String::new();
    let mut y = min_y;
    while y <= max_y {
        let mut x = min_x;
        while x <= max_x {
            let pos = Position::new(x, y);
            let symbol = match by_pos.get(&pos) {
                Some(_) if pos == search.src => 's',
                Some(_) if pos == search.dest => 'd',
                Some(v) if v.wall => '■',
                Some(_) if on_path.contains(&pos) => '*',
                Some(v) if v.visited => 'o',
                Some(_) => '□',
                None => ' ',
            };
            result.push(symbol);
            x += grid.spacing;
        }
        result.push('\n');
        y += grid.spacing;
    }
    result
}

/// Draw one snapshot of the search: every vertex styled by its flags, the
/// reconstructed path as line segments, and an info overlay.
fn draw_scene(search: &DijkstraSearch, config: &Config) {
    clear_background(Color::from_rgba(
        config.visual.background_r,
        config.visual.background_g,
        config.visual.background_b,
        255,
    ));

    let spacing = search.grid.spacing as f32;
    for v in &search.grid.vertices {
        let (x, y) = (v.pos.x as f32, v.pos.y as f32);
        if v.pos == search.src {
            draw_circle(x, y, 6.0, BLUE);
        } else if v.pos == search.dest {
            draw_circle(x, y, 6.0, RED);
        } else if v.wall {
            // Walls fill their whole lattice cell
            draw_rectangle(
                x - spacing / 2.0,
                y - spacing / 2.0,
                spacing,
                spacing,
                Color::from_rgba(178, 190, 181, 255),
            );
        } else if v.current {
            draw_circle(x, y, 4.0, GOLD);
        } else if v.visited {
            draw_circle(x, y, 4.0, WHITE);
        } else {
            draw_circle(x, y, 4.0, Color::from_rgba(255, 0, 255, 255));
        }
    }

    // trace_path runs destination-to-source; display wants source-to-destination
    if let Some(path) = search.path() {
        let forward: Vec<&Position> = path.iter().rev().collect();
        for pair in forward.windows(2) {
            draw_line(
                pair[0].x as f32,
                pair[0].y as f32,
                pair[1].x as f32,
                pair[1].y as f32,
                3.0,
                Color::from_rgba(121, 254, 12, 255),
            );
        }
    }

    let visited = search.grid.vertices.iter().filter(|v| v.visited).count();
    let status = match search.state() {
        SearchState::Running => "searching...".to_string(),
        SearchState::DestinationReached => match search.path_cost() {
            Some(cost) => format!("destination reached, cost {:.2}", cost),
            None => "destination reached".to_string(),
        },
        SearchState::Unreachable => "destination unreachable".to_string(),
    };
    draw_text(
        &format!(
            "Tick {} | visited {}/{} | {}",
            search.ticks(),
            visited,
            search.grid.len(),
            status
        ),
        10.0,
        20.0,
        20.0,
        WHITE,
    );
    draw_text("R: new scene  C: copy layout  Esc: quit", 10.0, 40.0, 20.0, GRAY);
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut rng = thread_rng();

    let mut app = match App::new(config, &mut rng) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to set up the search: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        // Stop requests are only honoured between ticks
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::R) {
            match App::new(config, &mut rng) {
                Ok(fresh) => app = fresh,
                Err(e) => eprintln!("Failed to rebuild the scene: {}", e),
            }
        }
        if is_key_pressed(KeyCode::C) {
            app.copy_to_clipboard();
        }

        app.update();
        draw_scene(&app.search, config);

        next_frame().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz::grid::Grid;

    #[test]
    fn scene_string_marks_terminals_and_walls() {
        let mut grid = Grid::generate(100, 100, 20);
        assert_eq!(grid.len(), 25);
        let src = grid.vertices[0].pos;
        let dest = grid.vertices[24].pos;
        grid.vertices[5].wall = true;
        let search = DijkstraSearch::new(grid, src, dest);

        let layout = scene_to_string(&search);
        let rows: Vec<&str> = layout.lines().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.chars().count() == 5));
        assert_eq!(layout.matches('s').count(), 1);
        assert_eq!(layout.matches('d').count(), 1);
        assert_eq!(layout.matches('■').count(), 1);
    }
}
