use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Viewport width in pixels
    #[serde(default = "default_width")]
    pub width: i32,
    /// Viewport height in pixels
    #[serde(default = "default_height")]
    pub height: i32,
    /// Lattice spacing in pixels
    #[serde(default = "default_spacing")]
    pub spacing: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Chance that a vertex will be a wall: 1 in `wall_chance`.
    /// The higher the number, the smaller the chance.
    #[serde(default = "default_wall_chance")]
    pub wall_chance: u32,
    /// How many search steps run per second
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: f32,
    /// Lead-in before the first step, handy for screen recording
    #[serde(default = "default_start_delay_secs")]
    pub start_delay_secs: f32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

// Default values
fn default_width() -> i32 { 800 }
fn default_height() -> i32 { 600 }
fn default_spacing() -> i32 { 20 }
fn default_wall_chance() -> u32 { 4 }
fn default_ticks_per_second() -> f32 { 8.0 }
fn default_start_delay_secs() -> f32 { 3.0 }
fn default_window_title() -> String { "Pathviz - Dijkstra Grid Demo".to_string() }
fn default_bg_r() -> u8 { 0 }
fn default_bg_g() -> u8 { 0 }
fn default_bg_b() -> u8 { 0 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            spacing: default_spacing(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            wall_chance: default_wall_chance(),
            ticks_per_second: default_ticks_per_second(),
            start_delay_secs: default_start_delay_secs(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse config.toml: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Reject configurations the search cannot run on
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.grid.spacing <= 0 {
            return Err(format!("grid.spacing must be positive, got {}", self.grid.spacing).into());
        }
        if self.grid.width <= 0 || self.grid.height <= 0 {
            return Err(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid.width, self.grid.height
            )
            .into());
        }
        if self.search.wall_chance == 0 {
            return Err("search.wall_chance must be at least 1".into());
        }
        if self.search.ticks_per_second <= 0.0 {
            return Err(format!(
                "search.ticks_per_second must be positive, got {}",
                self.search.ticks_per_second
            )
            .into());
        }
        if self.search.start_delay_secs < 0.0 {
            return Err(format!(
                "search.start_delay_secs must not be negative, got {}",
                self.search.start_delay_secs
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let mut config = Config::default();
        config.grid.spacing = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.width = -800;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.wall_chance = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.ticks_per_second = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.start_delay_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[grid]\nspacing = 40\n").unwrap();
        assert_eq!(config.grid.spacing, 40);
        assert_eq!(config.grid.width, 800);
        assert_eq!(config.search.wall_chance, 4);
        assert_eq!(config.visual.window_title, "Pathviz - Dijkstra Grid Demo");
    }
}
