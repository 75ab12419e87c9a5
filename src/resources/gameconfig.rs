//! Garden configuration resource.
//!
//! Manages tuning values loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [garden]
//! terrain = terrain.json
//! layout = layout.json
//! seed = 7
//! zone_radius = 10
//! completion_delay = 2
//!
//! [player]
//! move_speed = 0.2
//! water_duration = 2
//! height_offset = 1
//!
//! [flowers]
//! growth_delay = 0.5
//! growth_duration = 3
//! scale_epsilon = 0.01
//!
//! [camera]
//! follow_height = 30
//! follow_distance = 60
//! zoom_height = 25
//! zoom_distance = 48
//! follow_lerp = 0.05
//! zoom_duration = 1
//!
//! [wind]
//! strength = 0.12
//! speed = 1.8
//! ```
//!
//! Relative `terrain` and `layout` paths are resolved against the directory
//! holding the configuration file.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::components::flower::GrowthTiming;
use crate::error::{GardenError, Result};
use crate::resources::camera::CameraSettings;
use crate::resources::player::PlayerSettings;
use crate::resources::wind::Wind;

/// Default safe values for startup
const DEFAULT_TERRAIN: &str = "terrain.json";
const DEFAULT_LAYOUT: &str = "layout.json";
const DEFAULT_SEED: u64 = 7;
const DEFAULT_COMPLETION_DELAY: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./assets/garden/config.ini";

/// Garden configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Terrain description file.
    pub terrain_path: PathBuf,
    /// Flower layout file.
    pub layout_path: PathBuf,
    /// Seed for flower placement and sway phases.
    pub seed: u64,
    /// Pause between the last species completing and the garden completing.
    pub completion_delay: f32,
    pub player: PlayerSettings,
    pub growth: GrowthTiming,
    pub camera: CameraSettings,
    pub wind: Wind,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            terrain_path: PathBuf::from(DEFAULT_TERRAIN),
            layout_path: PathBuf::from(DEFAULT_LAYOUT),
            seed: DEFAULT_SEED,
            completion_delay: DEFAULT_COMPLETION_DELAY,
            player: PlayerSettings::default(),
            growth: GrowthTiming::default(),
            camera: CameraSettings::default(),
            wind: Wind::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Resolve a data path against the configuration file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    pub fn terrain_file(&self) -> PathBuf {
        self.resolve(&self.terrain_path)
    }

    pub fn layout_file(&self) -> PathBuf {
        self.resolve(&self.layout_path)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| GardenError::Config(format!("Failed to load config file: {}", e)))?;

        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // A zero step or tolerance would stall the player and growth.
        let positive = |section: &str, key: &str, value: Option<f32>| match value {
            Some(v) if v > 0.0 && v.is_finite() => Some(v),
            Some(v) => {
                warn!("[{}] {} = {} must be positive; keeping default", section, key, v);
                None
            }
            None => None,
        };

        // [garden] section
        if let Some(terrain) = config.get("garden", "terrain") {
            self.terrain_path = PathBuf::from(terrain);
        }
        if let Some(layout) = config.get("garden", "layout") {
            self.layout_path = PathBuf::from(layout);
        }
        if let Some(seed) = config.getuint("garden", "seed").ok().flatten() {
            self.seed = seed;
        }
        if let Some(radius) = float("garden", "zone_radius") {
            self.player.zone_radius = radius;
        }
        if let Some(delay) = float("garden", "completion_delay") {
            self.completion_delay = delay;
        }

        // [player] section
        if let Some(speed) = positive("player", "move_speed", float("player", "move_speed")) {
            self.player.move_speed = speed;
        }
        if let Some(duration) = float("player", "water_duration") {
            self.player.water_duration = duration;
        }
        if let Some(offset) = float("player", "height_offset") {
            self.player.height_offset = offset;
        }

        // [flowers] section
        if let Some(delay) = float("flowers", "growth_delay") {
            self.growth.delay = delay;
        }
        if let Some(duration) = float("flowers", "growth_duration") {
            self.growth.duration = duration;
        }
        if let Some(epsilon) = positive("flowers", "scale_epsilon", float("flowers", "scale_epsilon")) {
            self.growth.epsilon = epsilon;
        }

        // [camera] section
        if let Some(height) = float("camera", "follow_height") {
            self.camera.follow_offset.y = height;
        }
        if let Some(distance) = float("camera", "follow_distance") {
            self.camera.follow_offset.z = distance;
        }
        if let Some(height) = float("camera", "zoom_height") {
            self.camera.zoom_offset.y = height;
        }
        if let Some(distance) = float("camera", "zoom_distance") {
            self.camera.zoom_offset.z = distance;
        }
        if let Some(lerp) = float("camera", "follow_lerp") {
            self.camera.follow_lerp = lerp.clamp(0.0, 1.0);
        }
        if let Some(duration) = float("camera", "zoom_duration") {
            self.camera.zoom_duration = duration;
        }

        // [wind] section
        if let Some(strength) = float("wind", "strength") {
            self.wind.strength = strength;
        }
        if let Some(speed) = float("wind", "speed") {
            self.wind.speed = speed;
        }

        info!(
            "Loaded config: terrain={:?} layout={:?} seed={} zone={} growth={}s+{}s water={}s",
            self.terrain_path,
            self.layout_path,
            self.seed,
            self.player.zone_radius,
            self.growth.delay,
            self.growth.duration,
            self.player.water_duration
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();
        let mut put = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [garden] section
        put("garden", "terrain", self.terrain_path.display().to_string());
        put("garden", "layout", self.layout_path.display().to_string());
        put("garden", "seed", self.seed.to_string());
        put("garden", "zone_radius", self.player.zone_radius.to_string());
        put("garden", "completion_delay", self.completion_delay.to_string());

        // [player] section
        put("player", "move_speed", self.player.move_speed.to_string());
        put("player", "water_duration", self.player.water_duration.to_string());
        put("player", "height_offset", self.player.height_offset.to_string());

        // [flowers] section
        put("flowers", "growth_delay", self.growth.delay.to_string());
        put("flowers", "growth_duration", self.growth.duration.to_string());
        put("flowers", "scale_epsilon", self.growth.epsilon.to_string());

        // [camera] section
        let CameraSettings {
            follow_offset,
            zoom_offset,
            ..
        } = self.camera;
        put("camera", "follow_height", follow_offset.y.to_string());
        put("camera", "follow_distance", follow_offset.z.to_string());
        put("camera", "zoom_height", zoom_offset.y.to_string());
        put("camera", "zoom_distance", zoom_offset.z.to_string());
        put("camera", "follow_lerp", self.camera.follow_lerp.to_string());
        put("camera", "zoom_duration", self.camera.zoom_duration.to_string());

        // [wind] section
        put("wind", "strength", self.wind.strength.to_string());
        put("wind", "speed", self.wind.speed.to_string());

        config
            .write(&self.config_path)
            .map_err(|source| GardenError::Io {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Camera offsets keep X centered on the player.
    pub fn set_follow_offset(&mut self, height: f32, distance: f32) {
        self.camera.follow_offset = Vec3::new(0.0, height, distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gardenkeeper_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.player.zone_radius, 10.0);
        assert_eq!(config.growth.delay, 0.5);
        assert_eq!(config.camera.follow_offset, Vec3::new(0.0, 30.0, 60.0));
        assert_eq!(config.wind.strength, 0.12);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here/config.ini");
        assert!(matches!(config.load_from_file(), Err(GardenError::Config(_))));
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "[garden]\nseed = 42\n[flowers]\ngrowth_duration = 6\n").unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.growth.duration, 6.0);
        assert_eq!(config.growth.delay, 0.5);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_non_positive_speed_and_epsilon_keep_defaults() {
        let path = temp_path("nonpositive");
        std::fs::write(
            &path,
            "[player]\nmove_speed = 0\nwater_duration = 3\n[flowers]\nscale_epsilon = -0.5\n",
        )
        .unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.player.move_speed, PlayerSettings::default().move_speed);
        assert_eq!(config.growth.epsilon, GrowthTiming::default().epsilon);
        assert_eq!(config.player.water_duration, 3.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let mut original = GameConfig::with_path(&path);
        original.seed = 99;
        original.set_follow_offset(40.0, 80.0);
        original.player.water_duration = 1.5;
        original.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.seed, 99);
        assert_eq!(loaded.camera.follow_offset, Vec3::new(0.0, 40.0, 80.0));
        assert_eq!(loaded.player.water_duration, 1.5);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_relative_to_config_dir() {
        let config = GameConfig::with_path("/srv/garden/config.ini");
        assert_eq!(
            config.terrain_file(),
            PathBuf::from("/srv/garden/terrain.json")
        );
        assert_eq!(
            config.resolve(Path::new("/abs/layout.json")),
            PathBuf::from("/abs/layout.json")
        );
    }
}
