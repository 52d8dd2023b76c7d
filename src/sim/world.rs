//! Simulation world and the per-frame tick
//!
//! The world owns every sphere, the pointer and the global modifiers. Input
//! events mutate it between ticks; nothing touches it during one.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Sphere;
use super::collision::resolve;
use super::spawn::{Area, SpawnError, spawn};
use crate::consts::*;
use crate::settings::Settings;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whole viewport as a spawn area
    pub fn area(&self) -> Area {
        Area::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Radius around the pointer where repulsion and highlighting apply
    pub fn influence_radius(&self) -> f32 {
        (self.width.min(self.height) / INFLUENCE_DIVISOR + INFLUENCE_BASE).max(0.0)
    }
}

/// Last known pointer position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    /// Unknown until the first pointer-move event
    pub position: Option<Vec2>,
    pub influence_radius: f32,
}

impl Pointer {
    pub fn for_bounds(bounds: Bounds) -> Self {
        Self {
            position: None,
            influence_radius: bounds.influence_radius(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repulsion {
    pub enabled: bool,
    pub magnitude: f32,
}

/// Global modifiers applied to every sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub velocity_multiplier: f32,
    pub repulsion: Repulsion,
}

impl Modifiers {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            velocity_multiplier: settings.velocity_multiplier,
            repulsion: Repulsion {
                enabled: settings.repulsion_enabled,
                magnitude: settings.repulsion_magnitude,
            },
        }
    }
}

/// Everything the simulation needs for one session
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Sphere>,
    bounds: Bounds,
    pub pointer: Pointer,
    pub modifiers: Modifiers,
    settings: Settings,
    rng: Pcg32,
    /// Ticks since creation
    pub time_ticks: u64,
}

impl World {
    /// Empty world with a seeded RNG
    pub fn new(bounds: Bounds, mut settings: Settings, seed: u64) -> Self {
        settings.sanitize();
        Self {
            bodies: Vec::new(),
            bounds,
            pointer: Pointer::for_bounds(bounds),
            modifiers: Modifiers::from_settings(&settings),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
        }
    }

    /// Spheres in insertion order (oldest first)
    pub fn bodies(&self) -> &[Sphere] {
        &self.bodies
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance the simulation by one frame.
    ///
    /// Every sphere is moved first, then each touching pair is resolved once
    /// in index order.
    pub fn tick(&mut self) {
        self.time_ticks += 1;

        for body in &mut self.bodies {
            body.update(self.bounds, &self.pointer, &self.modifiers);
        }

        let n = self.bodies.len();
        for i in 0..n {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if !a.touches(b) {
                    continue;
                }
                if let Some((va, vb)) = resolve(a, b) {
                    a.vel = va;
                    b.vel = vb;
                }
            }
        }
    }

    /// Add an already-built sphere
    pub fn insert(&mut self, body: Sphere) {
        self.bodies.push(body);
    }

    /// Spawn one sphere anywhere in the viewport
    pub fn spawn_random(&mut self) -> Result<&Sphere, SpawnError> {
        let area = self.bounds.area();
        self.spawn_in(area)
    }

    /// Spawn one sphere near `center`, kept inside the viewport
    pub fn spawn_at(&mut self, center: Vec2) -> Result<&Sphere, SpawnError> {
        let half = self.settings.spawn_spread;
        // Pull the square fully inside so corners still fit the largest radius
        let center = Vec2::new(
            center.x.clamp(half, (self.bounds.width - half).max(half)),
            center.y.clamp(half, (self.bounds.height - half).max(half)),
        );
        let area = Area::around(center, half).clip(&self.bounds.area());
        self.spawn_in(area)
    }

    fn spawn_in(&mut self, area: Area) -> Result<&Sphere, SpawnError> {
        let radius = self
            .rng
            .random_range(self.settings.radius_min..=self.settings.radius_max);
        let pick = self.rng.random_range(0..self.settings.palette.len());
        let colour = self.settings.palette[pick];
        let speed = self.settings.max_speed;
        let body = spawn(&mut self.rng, radius, area, -speed..=speed, colour, &self.bodies)?;
        self.bodies.push(body);
        Ok(&self.bodies[self.bodies.len() - 1])
    }

    /// Spawn up to `count` spheres, stopping at the first that does not fit.
    /// Returns how many were added.
    pub fn populate(&mut self, count: usize) -> usize {
        for spawned in 0..count {
            if let Err(e) = self.spawn_random() {
                log::warn!("Stopped populating after {} spheres: {}", spawned, e);
                return spawned;
            }
        }
        count
    }

    /// Drop every sphere
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Remove the oldest sphere
    pub fn remove_oldest(&mut self) -> Option<Sphere> {
        if self.bodies.is_empty() {
            None
        } else {
            Some(self.bodies.remove(0))
        }
    }

    /// Change the viewport size; the influence radius follows
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.pointer.influence_radius = bounds.influence_radius();
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.position = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.position = None;
    }

    /// Flip repulsion on/off, returning the new state
    pub fn toggle_repulsion(&mut self) -> bool {
        let repulsion = &mut self.modifiers.repulsion;
        repulsion.enabled = !repulsion.enabled;
        repulsion.enabled
    }

    pub fn adjust_velocity_multiplier(&mut self, delta: f32) -> f32 {
        let m = &mut self.modifiers.velocity_multiplier;
        *m = (*m + delta).clamp(0.0, MAX_VELOCITY_MULTIPLIER);
        *m
    }

    pub fn adjust_repulsion_magnitude(&mut self, delta: f32) -> f32 {
        let m = &mut self.modifiers.repulsion.magnitude;
        *m = (*m + delta).clamp(0.0, MAX_REPULSION_MAGNITUDE);
        *m
    }
}
