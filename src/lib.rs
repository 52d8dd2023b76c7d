//! Sphere Field - bouncing, colliding spheres that shy away from the pointer
//!
//! Core modules:
//! - `sim`: Simulation (bodies, collisions, spawning, world tick)
//! - `renderer`: Drawing surface abstraction and the canvas 2D backend
//! - `app`: Platform-free driver (input events, pause, HUD, backgrounds)
//! - `settings`: Data-driven tunables

pub mod app;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Action, App, Event};
pub use settings::Settings;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Opacity change per tick when entering/leaving the pointer's influence
    pub const OPACITY_STEP: f32 = 0.02;
    /// Faintest a sphere can get
    pub const MIN_OPACITY: f32 = 0.2;
    /// Fully opaque
    pub const MAX_OPACITY: f32 = 1.0;

    /// Influence radius = min(width, height) / INFLUENCE_DIVISOR + INFLUENCE_BASE
    pub const INFLUENCE_DIVISOR: f32 = 12.0;
    pub const INFLUENCE_BASE: f32 = 75.0;

    /// Rejection sampling gives up after this many overlapping placements
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Global modifier limits
    pub const MAX_VELOCITY_MULTIPLIER: f32 = 10.0;
    pub const MAX_REPULSION_MAGNITUDE: f32 = 20.0;

    /// Default sphere mass
    pub const DEFAULT_MASS: f32 = 1.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
