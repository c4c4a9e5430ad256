//! Scalar influence of metaball sources at a sample point.
//!
//! Two interchangeable falloff formulas are supported:
//!
//! - [`Falloff::Bounded`]: `(1 - d)²` for squared distance `d <= 1`, and no
//!   contribution at all outside the unit radius.
//! - [`Falloff::Unbounded`]: `size / distance`, which grows without limit near
//!   the source center and is infinite exactly on it.

use crate::source::Metaball;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Field formula used to evaluate a source's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Falloff {
    /// Quadratic falloff with a hard cutoff at squared distance 1.
    Bounded,
    /// Inverse-distance falloff scaled by the source size.
    Unbounded,
}

impl Falloff {
    /// Contribution of a single `ball` at `sample`.
    ///
    /// Returns `None` when the bounded formula places the sample outside the
    /// source's reach, so callers can skip the source rather than add zero.
    /// The unbounded formula always contributes; a sample exactly on the
    /// source center yields `+inf` as IEEE division dictates.
    ///
    /// The bounded cutoff only tests `d > 1`: `d` is a sum of squares and can
    /// never fall below `-1`.
    pub fn contribution(self, ball: &Metaball, sample: Vec2) -> Option<f32> {
        let d = ball.distance_squared(sample);
        match self {
            Falloff::Bounded => {
                if d > 1.0 {
                    return None;
                }
                let falloff = 1.0 - d;
                Some(falloff * falloff)
            }
            Falloff::Unbounded => Some(ball.size / d.sqrt()),
        }
    }

    /// Aggregate field value at `sample`: the sum of every source's
    /// contribution, with absent contributions counted as zero.
    pub fn field_value(self, sources: &[Metaball], sample: Vec2) -> f32 {
        sources
            .iter()
            .filter_map(|ball| self.contribution(ball, sample))
            .fold(0.0, |sum, c| sum + c)
    }
}
