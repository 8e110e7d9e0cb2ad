//! JSON configuration for the canvas and the demo scenes
//!
//! Every field has a default, so a partial file (or `{}`) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paint::{Color, DEFAULT_ERASER_SIZE};

pub const DEFAULT_CONFIG_PATH: &str = "paintkit.json";

/// Canvas size and drawing colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub fill: Color,
    pub selected: Color,
    pub background: Color,
    pub eraser_size: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 801,
            height: 801,
            fill: Color::WHITE,
            selected: Color::BLUE,
            background: Color::WHITE,
            eraser_size: DEFAULT_ERASER_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoMode {
    /// Particles coloring a grid of cells
    Board,
    /// Asteroids orbiting a sun
    Galaxy,
}

impl std::str::FromStr for DemoMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "board" => Ok(DemoMode::Board),
            "galaxy" => Ok(DemoMode::Galaxy),
            other => Err(format!("unknown demo mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub mode: DemoMode,
    /// RNG seed; 0 seeds from the clock
    pub seed: u64,
    /// Milliseconds between heartbeats
    pub tick_ms: u64,
    pub asteroids: usize,
    /// Cells per side of the board grid
    pub grid_cells: u32,
    /// Per-tick fade factor for the galaxy trails
    pub fade: f64,
    pub snapshot_path: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: DemoMode::Board,
            seed: 1,
            tick_ms: 20,
            asteroids: 100,
            grid_cells: 100,
            fade: 0.99,
            snapshot_path: PathBuf::from("snapshot.bmp"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub demo: DemoConfig,
}

impl Config {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load config, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            },
            Err(e) => {
                log::warn!("using default config ({}): {}", path.display(), e);
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "canvas": { "width": 64, "fill": {"r": 0, "g": 0, "b": 0} },
            "demo": { "mode": "galaxy", "seed": 7 }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.canvas.width, 64);
        assert_eq!(config.canvas.height, 801);
        assert_eq!(config.canvas.fill, Color::BLACK);
        assert_eq!(config.canvas.selected, Color::BLUE);
        assert_eq!(config.demo.mode, DemoMode::Galaxy);
        assert_eq!(config.demo.seed, 7);
        assert_eq!(config.demo.tick_ms, 20);
    }

    #[test]
    fn test_bad_mode_is_config_error() {
        let err = serde_json::from_str::<Config>(r#"{"demo": {"mode": "paint"}}"#).unwrap_err();
        let err: crate::error::PaintError = err.into();
        assert!(matches!(err, crate::error::PaintError::Config(_)));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("board".parse::<DemoMode>(), Ok(DemoMode::Board));
        assert_eq!("galaxy".parse::<DemoMode>(), Ok(DemoMode::Galaxy));
        assert!("Galaxy".parse::<DemoMode>().is_err());
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("paintkit-config-{}.json", std::process::id()));
        let mut config = Config::default();
        config.demo.asteroids = 12;
        config.canvas.background = Color::RED;
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
        std::fs::remove_file(&path).ok();
    }

    #[test_log::test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("/nonexistent/paintkit.json");
        assert_eq!(config, Config::default());
    }
}
