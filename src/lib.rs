//! Orbit camera controls for a small 3D scene demo.
//!
//! [`controls`] holds the reusable controller; [`surface`] feeds it winit
//! input, [`config`] loads its settings and [`world`] bundles the demo state.

pub mod config;
pub mod controls;
pub mod surface;
pub mod world;

pub use controls::{OrbitCamera, OrbitControls, OrbitSettings};
