//! Threshold sampling of the metaball field over a square grid.
//!
//! The grid covers `[-extent, extent]²` sample indices with a spacing of
//! `1 / render_size` domain units. Every sample whose field passes the
//! threshold is emitted as a point in domain coordinates, in row-major order
//! (outer loop over x, inner loop over y).

use crate::config::SceneConfig;
use crate::field::Falloff;
use crate::source::Metaball;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// When a sample point is queued for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emission {
    /// Queue the point once for every source whose own contribution passes
    /// the threshold, and once more if the summed field passes it.
    ///
    /// The same point can therefore appear several times in one frame. With
    /// opaque flat-color points this is invisible, and the duplicates are
    /// kept so point counts stay comparable with the reference animation.
    PerSourceAndSum,
    /// Queue the point once if the summed field passes the threshold.
    SumOnly,
}

/// Samples the field of a set of sources and collects the points to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRenderer {
    falloff: Falloff,
    emission: Emission,
    render_size: u32,
    extent: i32,
    threshold: f32,
}

impl GridRenderer {
    /// Builds a renderer from the sampling fields of `config`.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            falloff: config.falloff,
            emission: config.emission,
            render_size: config.render_size,
            extent: config.loop_extent(),
            threshold: config.threshold,
        }
    }

    /// Largest sample index on each axis; indices run over `-extent..=extent`.
    pub fn extent(&self) -> i32 {
        self.extent
    }

    /// Total number of grid samples evaluated per frame.
    pub fn sample_count(&self) -> usize {
        let side = (2 * self.extent as usize) + 1;
        side * side
    }

    /// Domain coordinate of sample index `i`.
    fn coordinate(&self, i: i32) -> f32 {
        i as f32 / self.render_size as f32
    }

    /// Returns this frame's points for `sources`.
    pub fn render(&self, sources: &[Metaball]) -> Vec<Vec2> {
        let mut points = Vec::new();
        self.render_into(sources, &mut points);
        points
    }

    /// Clears `points` and fills it with this frame's points, reusing its allocation.
    pub fn render_into(&self, sources: &[Metaball], points: &mut Vec<Vec2>) {
        points.clear();
        for i in -self.extent..=self.extent {
            let x = self.coordinate(i);
            for j in -self.extent..=self.extent {
                let sample = Vec2::new(x, self.coordinate(j));
                let mut sum = 0.0_f32;
                for ball in sources {
                    let Some(contribution) = self.falloff.contribution(ball, sample) else {
                        continue;
                    };
                    sum += contribution;
                    if self.emission == Emission::PerSourceAndSum && contribution > self.threshold {
                        points.push(sample);
                    }
                }
                if sum > self.threshold {
                    points.push(sample);
                }
            }
        }
    }
}
