//! Sphere placement by rejection sampling
//!
//! Positions are drawn uniformly inside a range, shrunk by the radius so the
//! new sphere starts fully inside, and redrawn while they overlap anything
//! already placed. Non-overlap holds at creation time only.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::body::{Colour, Sphere};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::distance;

/// Axis-aligned area spawn positions are drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub min: Vec2,
    pub max: Vec2,
}

impl Area {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square of half-width `half` around `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(center - Vec2::splat(half), center + Vec2::splat(half))
    }

    /// Intersection with another area (may be empty)
    pub fn clip(&self, other: &Area) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpawnError {
    #[error("no free spot for a sphere of radius {radius} after {attempts} attempts")]
    PlacementExhausted { radius: f32, attempts: u32 },
    #[error("spawn area is too small for a sphere of radius {radius}")]
    RangeTooSmall { radius: f32 },
}

/// Place a new sphere that does not overlap any of `existing`.
///
/// The position is uniform in `[min + radius, max - radius]` per axis and the
/// velocity uniform in `velocity` per axis.
pub fn spawn<R: Rng>(
    rng: &mut R,
    radius: f32,
    area: Area,
    velocity: RangeInclusive<f32>,
    colour: Colour,
    existing: &[Sphere],
) -> Result<Sphere, SpawnError> {
    let lo = area.min + Vec2::splat(radius);
    let hi = area.max - Vec2::splat(radius);
    if !(lo.x <= hi.x && lo.y <= hi.y) {
        return Err(SpawnError::RangeTooSmall { radius });
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(rng.random_range(lo.x..=hi.x), rng.random_range(lo.y..=hi.y));
        let clear = existing
            .iter()
            .all(|other| distance(pos, other.pos) > radius + other.radius());
        if clear {
            let vel = Vec2::new(
                rng.random_range(velocity.clone()),
                rng.random_range(velocity.clone()),
            );
            return Ok(Sphere::new(radius, pos, vel, colour));
        }
    }

    Err(SpawnError::PlacementExhausted {
        radius,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}
