//! A single metaball: a moving point source of scalar influence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One influence point in the animation.
///
/// `position` lives in domain coordinates; `velocity` has constant magnitude
/// and only changes sign when the integrator reflects it at a domain bound.
/// `size` is fixed for the lifetime of the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metaball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

impl Metaball {
    /// Creates a source at `(x, y)` moving with `(x_force, y_force)` units per second.
    pub fn new(x: f32, y: f32, x_force: f32, y_force: f32, size: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::new(x_force, y_force),
            size,
        }
    }

    /// Squared distance from this source's center to `sample`.
    ///
    /// Written out component-wise so the result is bit-for-bit stable across
    /// platforms, which the grid regression counts rely on.
    pub fn distance_squared(&self, sample: Vec2) -> f32 {
        let dx = sample.x - self.position.x;
        let dy = sample.y - self.position.y;
        dx * dx + dy * dy
    }
}
