//! Tunables and preferences
//!
//! Loaded from an optional JSON blob (the canvas `data-settings` attribute on
//! the web). Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_REPULSION_MAGNITUDE, MAX_VELOCITY_MULTIPLIER};
use crate::sim::Colour;

/// Simulation and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Population ===
    /// Spheres spawned on start and after every resize
    pub initial_spheres: usize,
    /// Sphere radius range (pixels)
    pub radius_min: f32,
    pub radius_max: f32,
    /// Per-axis speed range is [-max_speed, max_speed] (pixels/tick)
    pub max_speed: f32,
    /// Half-width of the square the spawn key drops new spheres into
    pub spawn_spread: f32,
    /// Seed for placement; random per session when absent
    pub seed: Option<u64>,

    // === Modifiers ===
    pub velocity_multiplier: f32,
    pub repulsion_enabled: bool,
    pub repulsion_magnitude: f32,
    /// Change per scroll notch
    pub multiplier_step: f32,
    pub magnitude_step: f32,

    // === Look ===
    /// Sphere fill colours, picked at random on spawn
    pub palette: Vec<Colour>,
    /// Background colours cycled with the background key
    pub backgrounds: Vec<Colour>,

    // === HUD ===
    pub show_info: bool,
    /// HUD alpha change per frame while fading
    pub hud_fade_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_spheres: 40,
            radius_min: 10.0,
            radius_max: 30.0,
            max_speed: 2.0,
            spawn_spread: 50.0,
            seed: None,

            velocity_multiplier: 1.0,
            repulsion_enabled: true,
            repulsion_magnitude: 0.5,
            multiplier_step: 0.1,
            magnitude_step: 0.1,

            palette: vec![
                Colour(0x2e, 0xc4, 0xb6),
                Colour(0xe7, 0x1d, 0x36),
                Colour(0xff, 0x9f, 0x1c),
                Colour(0x01, 0x16, 0x27),
                Colour(0xfd, 0xff, 0xfc),
            ],
            backgrounds: vec![
                Colour(0x11, 0x11, 0x18),
                Colour(0xf4, 0xf1, 0xde),
                Colour(0x1b, 0x26, 0x3b),
                Colour(0x3d, 0x40, 0x5b),
            ],

            show_info: true,
            hud_fade_step: 0.05,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; unknown fields are ignored, missing ones
    /// default. The result is sanitized.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Parse if present, falling back to defaults on error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Bring out-of-range values back to something the simulation accepts
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        if !(self.radius_min > 0.0) {
            log::warn!("radius_min must be positive, using {}", defaults.radius_min);
            self.radius_min = defaults.radius_min;
        }
        if !(self.radius_max >= self.radius_min) {
            self.radius_max = self.radius_min;
        }
        if !(self.max_speed >= 0.0) {
            self.max_speed = defaults.max_speed;
        }
        // The spawn square must fit the biggest sphere
        self.spawn_spread = self.spawn_spread.max(self.radius_max);

        self.velocity_multiplier = self.velocity_multiplier.clamp(0.0, MAX_VELOCITY_MULTIPLIER);
        self.repulsion_magnitude = self.repulsion_magnitude.clamp(0.0, MAX_REPULSION_MAGNITUDE);
        self.hud_fade_step = self.hud_fade_step.clamp(0.001, 1.0);

        if self.palette.is_empty() {
            self.palette = defaults.palette;
        }
        if self.backgrounds.is_empty() {
            self.backgrounds = defaults.backgrounds;
        }
    }
}
