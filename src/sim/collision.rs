//! Sphere-sphere collision response
//!
//! Elastic exchange along the line of centers. The velocities are rotated
//! into a frame where the line of centers is the x-axis, the 1-D elastic
//! formula is applied to x, and the result is rotated back.

use glam::Vec2;

use super::body::Sphere;
use crate::rotate;

/// Post-collision velocities for `a` and `b`, or `None` if they are
/// separating along the line of centers.
///
/// Callers are expected to check contact first; this only looks at the
/// relative motion.
pub fn resolve(a: &Sphere, b: &Sphere) -> Option<(Vec2, Vec2)> {
    let dp = b.pos - a.pos;
    let dv = a.vel - b.vel;

    if dv.dot(dp) < 0.0 {
        return None;
    }

    let angle = -dp.y.atan2(dp.x);
    let (m1, m2) = (a.mass(), b.mass());

    let u1 = rotate(a.vel, angle);
    let u2 = rotate(b.vel, angle);

    let v1 = Vec2::new(elastic(u1.x, u2.x, m1, m2), u1.y);
    let v2 = Vec2::new(elastic(u2.x, u1.x, m2, m1), u2.y);

    Some((rotate(v1, -angle), rotate(v2, -angle)))
}

/// 1-D elastic collision: final velocity of body 1
#[inline]
fn elastic(u1: f32, u2: f32, m1: f32, m2: f32) -> f32 {
    (u1 * (m1 - m2) + 2.0 * m2 * u2) / (m1 + m2)
}
