//! Simulation module
//!
//! Everything that moves lives here. Pure and deterministic for a given seed:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod spawn;
pub mod world;

pub use body::{Colour, Sphere};
pub use collision::resolve;
pub use spawn::{Area, SpawnError, spawn};
pub use world::{Bounds, Modifiers, Pointer, Repulsion, World};
