// config.rs
//
// Runtime configuration:
// - Settings live in a JSON file: { "scene": { ... }, "controls": { ... } }
// - Every field is optional; missing sections fall back to the demo defaults,
//   missing fields inside "controls" fall back to the controller defaults
// - null for max_distance / max_zoom / azimuth limits means unbounded
//
// File selection:
// - CLI: --config <path>
// - Env: ORBIT_SCENE_CONFIG
// - <exe_dir>/assets/orbit.json, then ./assets/orbit.json
// - Otherwise: built-in defaults

use glam::Vec3;
use serde::Deserialize;
use std::{
    f32::consts::FRAC_PI_2,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::controls::OrbitSettings;

pub const CONFIG_ENV: &str = "ORBIT_SCENE_CONFIG";
const CONFIG_FILE: &str = "orbit.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Camera and window setup of the demo scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub target: Vec3,
    pub camera_position: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            target: Vec3::new(250.0, 80.0, 250.0),
            camera_position: Vec3::new(250.0, 400.0, 800.0),
            fov: 60.0,
            near: 0.1,
            far: 4000.0,
            window_width: 1280,
            window_height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub scene: SceneSettings,
    #[serde(default = "demo_controls")]
    pub controls: OrbitSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene: SceneSettings::default(),
            controls: demo_controls(),
        }
    }
}

/// Controller tuning used by the demo: stays above the ground and within reach of the grid.
pub fn demo_controls() -> OrbitSettings {
    OrbitSettings {
        min_distance: 150.0,
        max_distance: 1000.0,
        min_polar_angle: 0.0,
        max_polar_angle: FRAC_PI_2 - 10f32.to_radians(),
        rotate_speed: 0.4,
        enable_pan: false,
        ..OrbitSettings::default()
    }
}

pub fn parse(text: &str, path: &Path) -> Result<SceneConfig, ConfigError> {
    serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<SceneConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}

/// Find assets/orbit.json by searching:
/// 1) <exe_dir>/assets/orbit.json
/// 2) ./assets/orbit.json  (dev working dir)
fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join(CONFIG_FILE);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join(CONFIG_FILE);
    if p.exists() {
        return Some(p);
    }

    None
}

fn path_from_args(args: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        if a == "--config" {
            if let Some(v) = it.next() {
                return Some(PathBuf::from(v));
            }
        }
    }
    None
}

/// Choose the config file from CLI, env, then the asset directories.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = path_from_args(std::env::args()) {
        return Some(p);
    }

    if let Ok(v) = std::env::var(CONFIG_ENV) {
        if !v.trim().is_empty() {
            return Some(PathBuf::from(v));
        }
    }

    find_config_file()
}

/// Load the resolved config, falling back to defaults on any error.
pub fn load_or_default() -> SceneConfig {
    let Some(path) = resolve_config_path() else {
        log::info!("No config file found, using built-in defaults");
        return SceneConfig::default();
    };

    match load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{e}; using built-in defaults");
            SceneConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_demo_defaults() {
        let config = parse("{}", Path::new("inline.json")).unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.controls.min_distance, 150.0);
        assert!(!config.controls.enable_pan);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let text = r#"{
            "scene": { "fov": 45.0, "target": [0.0, 0.0, 0.0] },
            "controls": { "enable_damping": true, "max_distance": null }
        }"#;
        let config = parse(text, Path::new("inline.json")).unwrap();
        assert_eq!(config.scene.fov, 45.0);
        assert_eq!(config.scene.target, Vec3::ZERO);
        assert_eq!(config.scene.window_width, 1280);
        assert!(config.controls.enable_damping);
        assert_eq!(config.controls.max_distance, f32::INFINITY);
    }

    #[test]
    fn malformed_json_reports_path() {
        let err = parse("{ \"scene\": ", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load(Path::new("definitely/not/here/orbit.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn config_flag_takes_next_argument() {
        let args = ["orbit_scene", "--config", "custom.json"].map(String::from);
        assert_eq!(path_from_args(args), Some(PathBuf::from("custom.json")));

        let args = ["orbit_scene", "--config"].map(String::from);
        assert_eq!(path_from_args(args), None);
    }
}
