//! Scene settings
//!
//! Defaults give the stock 800x600 scene. A JSON file named by
//! `RAY_FAN_SETTINGS` may override any subset of fields; nothing is ever
//! written back.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{ScenePalette, SceneStyle, rgb8, rgba8};
use crate::sim::{Circle, FanConfig, RootPolicy, SceneState};

/// Environment variable holding the path of a settings file
pub const SETTINGS_ENV: &str = "RAY_FAN_SETTINGS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

/// 8-bit colors, as written in settings files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub background: [u8; 3],
    pub obstacle: [u8; 4],
    pub hit_ray: [u8; 4],
    pub miss_ray: [u8; 4],
    pub light: [u8; 4],
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            background: [30, 30, 30],
            obstacle: [0, 120, 200, 255],
            hit_ray: [255, 255, 0, 100],
            miss_ray: [255, 255, 0, 50],
            light: [255, 255, 0, 255],
        }
    }
}

impl PaletteSettings {
    pub fn to_palette(&self) -> ScenePalette {
        let [r, g, b] = self.background;
        let rgba = |c: [u8; 4]| rgba8(c[0], c[1], c[2], c[3]);
        ScenePalette {
            background: rgb8(r, g, b),
            obstacle: rgba(self.obstacle),
            hit_ray: rgba(self.hit_ray),
            miss_ray: rgba(self.miss_ray),
            light: rgba(self.light),
        }
    }
}

/// All tunables of the demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,

    // === Scene ===
    pub obstacle_center: Vec2,
    pub obstacle_radius: f32,
    /// Where the light appears at startup
    pub light_start: Vec2,
    pub pick_radius: f32,
    pub light_marker_radius: f32,

    // === Ray fan ===
    pub ray_count: u32,
    pub max_ray_length: f32,
    pub hit_epsilon: f32,
    /// Interior-origin behavior of the intersection test
    pub root_policy: RootPolicy,

    // === Drawing ===
    pub circle_segments: u32,
    pub palette: PaletteSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),

            obstacle_center: OBSTACLE_CENTER,
            obstacle_radius: OBSTACLE_RADIUS,
            light_start: LIGHT_START,
            pick_radius: PICK_RADIUS,
            light_marker_radius: LIGHT_MARKER_RADIUS,

            ray_count: RAY_COUNT,
            max_ray_length: MAX_RAY_LENGTH,
            hit_epsilon: HIT_EPSILON,
            root_policy: RootPolicy::NearOnly,

            circle_segments: CIRCLE_SEGMENTS,
            palette: PaletteSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.validate();
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`SETTINGS_ENV`], or defaults.
    ///
    /// A missing or broken file is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let path = Path::new(&path);
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e} ({}); using default settings", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values the scene cannot work with. Returns the names of fields
    /// that were changed.
    pub fn validate(&mut self) -> Vec<&'static str> {
        let mut fixed = Vec::new();

        if self.window.width == 0 || self.window.height == 0 {
            self.window.width = self.window.width.max(1);
            self.window.height = self.window.height.max(1);
            fixed.push("window");
        }
        if self.ray_count == 0 {
            self.ray_count = 1;
            fixed.push("ray_count");
        }
        if self.circle_segments < 3 {
            self.circle_segments = 3;
            fixed.push("circle_segments");
        }
        for (name, value) in [
            ("obstacle_radius", &mut self.obstacle_radius),
            ("pick_radius", &mut self.pick_radius),
            ("light_marker_radius", &mut self.light_marker_radius),
            ("max_ray_length", &mut self.max_ray_length),
            ("hit_epsilon", &mut self.hit_epsilon),
        ] {
            // `!(x >= 0)` also catches NaN
            if !(*value >= 0.0) {
                *value = 0.0;
                fixed.push(name);
            }
        }

        for name in &fixed {
            log::warn!("Settings: clamped out-of-range `{name}`");
        }
        fixed
    }

    pub fn scene_state(&self) -> SceneState {
        SceneState::new(
            Circle::new(self.obstacle_center, self.obstacle_radius),
            self.light_start,
            self.pick_radius,
        )
    }

    pub fn fan_config(&self) -> FanConfig {
        FanConfig {
            ray_count: self.ray_count,
            max_length: self.max_ray_length,
            epsilon: self.hit_epsilon,
            root_policy: self.root_policy,
        }
    }

    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            palette: self.palette.to_palette(),
            circle_segments: self.circle_segments,
            light_marker_radius: self.light_marker_radius,
        }
    }
}
