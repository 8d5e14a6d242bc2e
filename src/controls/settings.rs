//! Tunable limits, speeds and switches of the orbit controller.

use serde::{Deserialize, Deserializer};
use std::f32::consts::PI;

use super::input::{KeyBindings, MouseBindings};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Set to false to ignore all input.
    pub enabled: bool,

    // How far the camera can dolly in and out (perspective only)
    pub min_distance: f32,
    #[serde(deserialize_with = "unbounded_max")]
    pub max_distance: f32,

    // How far the camera can zoom in and out (orthographic only)
    pub min_zoom: f32,
    #[serde(deserialize_with = "unbounded_max")]
    pub max_zoom: f32,

    /// Vertical orbit limits, within `[0, PI]` radians.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    /// Horizontal orbit limits. When finite, a sub-interval of `[-PI, PI]`.
    #[serde(deserialize_with = "unbounded_min")]
    pub min_azimuth_angle: f32,
    #[serde(deserialize_with = "unbounded_max")]
    pub max_azimuth_angle: f32,

    /// Inertia. Requires `update()` to be called every frame.
    pub enable_damping: bool,
    pub damping_factor: f32,

    pub enable_zoom: bool,
    pub zoom_speed: f32,

    pub enable_rotate: bool,
    pub rotate_speed: f32,

    pub enable_pan: bool,
    /// Pixels moved per arrow key press.
    pub key_pan_speed: f32,

    /// Requires `update()` to be called every frame.
    pub auto_rotate: bool,
    /// 2.0 is one round per 30 seconds at 60 updates per second.
    pub auto_rotate_speed: f32,

    pub enable_keys: bool,
    pub keys: KeyBindings,
    pub mouse_buttons: MouseBindings,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
            enable_damping: false,
            damping_factor: 0.25,
            enable_zoom: true,
            zoom_speed: 1.0,
            enable_rotate: true,
            rotate_speed: 1.0,
            enable_pan: true,
            key_pan_speed: 7.0,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            enable_keys: true,
            keys: KeyBindings::default(),
            mouse_buttons: MouseBindings::default(),
        }
    }
}

impl OrbitSettings {
    /// Multiplicative radius step of one dolly increment.
    pub fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Azimuth decrement applied per update while auto-rotating.
    pub fn auto_rotation_angle(&self) -> f32 {
        2.0 * PI / 60.0 / 60.0 * self.auto_rotate_speed
    }
}

// JSON has no infinity; a missing bound is written as null.
fn unbounded_max<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::INFINITY))
}

fn unbounded_min<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NEG_INFINITY))
}
