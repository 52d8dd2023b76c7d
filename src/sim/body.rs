//! Sphere entity and its per-tick update
//!
//! A sphere integrates its own velocity, bounces off the viewport edges,
//! gets pushed away by the pointer and brightens while the pointer is near.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{Bounds, Modifiers, Pointer};
use crate::consts::*;
use crate::distance;

/// Opaque RGB colour token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour(pub u8, pub u8, pub u8);

impl Colour {
    pub const WHITE: Colour = Colour(255, 255, 255);
    pub const BLACK: Colour = Colour(0, 0, 0);

    /// Normalized RGBA for the given alpha
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            alpha.clamp(0.0, 1.0),
        ]
    }
}

/// A simulated circular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sphere {
    radius: f32,
    pub pos: Vec2,
    /// Displacement per tick, before the global velocity multiplier
    pub vel: Vec2,
    mass: f32,
    pub colour: Colour,
    /// Visual only, kept within [MIN_OPACITY, MAX_OPACITY]
    opacity: f32,
}

impl Sphere {
    pub fn new(radius: f32, pos: Vec2, vel: Vec2, colour: Colour) -> Self {
        Self::with_mass(radius, pos, vel, DEFAULT_MASS, colour)
    }

    /// Radius and mass must be positive
    pub fn with_mass(radius: f32, pos: Vec2, vel: Vec2, mass: f32, colour: Colour) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        debug_assert!(mass > 0.0, "sphere mass must be positive");
        Self {
            radius,
            pos,
            vel,
            mass,
            colour,
            opacity: MIN_OPACITY,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True if the two spheres overlap (strictly closer than the sum of radii)
    #[inline]
    pub fn touches(&self, other: &Sphere) -> bool {
        distance(self.pos, other.pos) < self.radius + other.radius
    }

    /// Advance one tick
    pub fn update(&mut self, bounds: Bounds, pointer: &Pointer, modifiers: &Modifiers) {
        self.pos += self.vel * modifiers.velocity_multiplier;

        self.vel.x = reflect_axis(self.pos.x, self.vel.x, self.radius, bounds.width);
        self.vel.y = reflect_axis(self.pos.y, self.vel.y, self.radius, bounds.height);

        let near = match pointer.position {
            Some(target) => {
                let d = distance(self.pos, target);
                let within = d < pointer.influence_radius;
                // Coincident with the pointer: no direction to push along
                if within && modifiers.repulsion.enabled && d > 0.0 {
                    self.vel += (self.pos - target) * (modifiers.repulsion.magnitude / d);
                }
                within
            }
            None => false,
        };

        self.opacity = if near {
            (self.opacity + OPACITY_STEP).min(MAX_OPACITY)
        } else {
            (self.opacity - OPACITY_STEP).max(MIN_OPACITY)
        };
    }
}

/// Flip a velocity component that carries the body past either edge
#[inline]
fn reflect_axis(pos: f32, vel: f32, radius: f32, size: f32) -> f32 {
    if (pos - radius <= 0.0 && vel < 0.0) || (pos + radius >= size && vel > 0.0) {
        -vel
    } else {
        vel
    }
}
