//! Runtime settings, read from an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::scenes::Stage;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "glstages.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Window".to_string(),
            width: 800,
            height: 800,
            fullscreen: false,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance moved per frame.
    pub speed: f32,
    /// Distance moved per frame while left control is held.
    pub fast_speed: f32,
    pub sensitivity: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            speed: 0.1,
            fast_speed: 0.5,
            sensitivity: 70.0,
            position: [0.0, 0.0, 2.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub clear_color: [f32; 4],
    /// Directory holding `shaders/` and `textures/`.
    pub assets: PathBuf,
    /// Stage shown at startup.
    pub stage: Stage,
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            clear_color: [0.07, 0.13, 0.17, 1.0],
            assets: PathBuf::from("assets"),
            stage: Stage::Camera,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text. Missing fields take their defaults.
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Places a configuration file is looked for, in order of preference.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("glstages").join("config.json"));
        }
        paths
    }

    /// Loads the first existing file from `paths`, or the defaults if none exists.
    ///
    /// Returns the path that was used alongside the configuration.
    pub fn load_from(paths: &[PathBuf]) -> anyhow::Result<(Self, Option<PathBuf>)> {
        match paths.iter().find(|path| path.is_file()) {
            Some(path) => Ok((Self::from_file(path)?, Some(path.clone()))),
            None => Ok((Self::default(), None)),
        }
    }
}
