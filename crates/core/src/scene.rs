//! The `Scene` trait driven once per frame by the viewer, and the
//! [`Metaballs`] scene that implements it.
//!
//! The trait is object-safe so the viewer can hold a `Box<dyn Scene>`.

use crate::config::SceneConfig;
use crate::error::MetaballError;
use crate::grid::GridRenderer;
use crate::integrator::Integrator;
use crate::source::Metaball;
use glam::Vec2;
use serde_json::{json, Value};
use std::time::Instant;

/// Per-frame interface between an animation and the application loop.
pub trait Scene {
    /// Advance the animation by `elapsed_secs` seconds.
    fn update(&mut self, elapsed_secs: f32);

    /// Points to draw this frame, in domain coordinates.
    fn render(&self) -> Vec<Vec2>;

    /// Current state and constants as a JSON object.
    fn params(&self) -> Value;
}

/// A set of moving metaball sources sampled on a fixed grid.
///
/// Owns the source list for its whole lifetime; sources are never added or
/// removed after construction.
pub struct Metaballs {
    config: SceneConfig,
    sources: Vec<Metaball>,
    integrator: Integrator,
    grid: GridRenderer,
}

impl Metaballs {
    /// Creates the scene, measuring the first frame's elapsed time from `start`.
    ///
    /// Returns an error if `config` fails [`SceneConfig::validate`].
    pub fn new(config: SceneConfig, start: Instant) -> Result<Self, MetaballError> {
        config.validate()?;
        let integrator = Integrator::new(config.scaling, config.bound(), start);
        let grid = GridRenderer::from_config(&config);
        let sources = config.sources.clone();
        Ok(Self {
            config,
            sources,
            integrator,
            grid,
        })
    }

    /// Integrates over the time since the previous update, ending at `now`.
    pub fn advance_to(&mut self, now: Instant) {
        let elapsed = self.integrator.elapsed_until(now);
        self.update(elapsed);
    }

    /// Fills `points` with this frame's points, reusing its allocation.
    pub fn render_into(&self, points: &mut Vec<Vec2>) {
        self.grid.render_into(&self.sources, points);
    }

    /// Current source states.
    pub fn sources(&self) -> &[Metaball] {
        &self.sources
    }

    /// The configuration this scene was built from.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Half-width of the visible domain.
    pub fn bound(&self) -> f32 {
        self.integrator.bound()
    }
}

impl Scene for Metaballs {
    fn update(&mut self, elapsed_secs: f32) {
        self.integrator.integrate(&mut self.sources, elapsed_secs);
    }

    fn render(&self) -> Vec<Vec2> {
        self.grid.render(&self.sources)
    }

    fn params(&self) -> Value {
        json!({
            "falloff": self.config.falloff,
            "emission": self.config.emission,
            "render_size": self.config.render_size,
            "scaling": self.config.scaling,
            "threshold": self.config.threshold,
            "samples_per_frame": self.grid.sample_count(),
            "sources": self.sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scene(config: SceneConfig) -> Metaballs {
        Metaballs::new(config, Instant::now()).unwrap()
    }

    #[test]
    fn new_copies_preset_sources() {
        let s = scene(SceneConfig::bounded());
        assert_eq!(s.sources(), SceneConfig::bounded().sources.as_slice());
        assert_eq!(s.bound(), 3.5);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SceneConfig {
            sources: Vec::new(),
            ..SceneConfig::bounded()
        };
        assert!(matches!(
            Metaballs::new(config, Instant::now()),
            Err(MetaballError::NoSources)
        ));
    }

    #[test]
    fn update_moves_sources_but_keeps_count() {
        let mut s = scene(SceneConfig::unbounded());
        let before = s.sources().to_vec();
        s.update(0.1);
        assert_eq!(s.sources().len(), before.len());
        assert!(s
            .sources()
            .iter()
            .zip(&before)
            .all(|(after, before)| after.position != before.position));
    }

    #[test]
    fn render_without_update_is_deterministic() {
        let s = scene(SceneConfig::unbounded());
        assert_eq!(s.render(), s.render());
    }

    #[test]
    fn render_changes_after_update() {
        let mut s = scene(SceneConfig::unbounded());
        let first = s.render();
        s.update(0.5);
        assert_ne!(first, s.render());
    }

    #[test]
    fn render_into_matches_render() {
        let s = scene(SceneConfig::unbounded());
        let mut points = Vec::new();
        s.render_into(&mut points);
        assert_eq!(points, s.render());
    }

    #[test]
    fn advance_to_uses_injected_clock() {
        let start = Instant::now();
        let mut clocked = Metaballs::new(SceneConfig::unbounded(), start).unwrap();
        let mut manual = Metaballs::new(SceneConfig::unbounded(), start).unwrap();

        clocked.advance_to(start + Duration::from_millis(200));
        manual.update(0.2);

        for (a, b) in clocked.sources().iter().zip(manual.sources()) {
            assert!((a.position - b.position).length() < 1e-6);
        }
    }

    #[test]
    fn sources_stay_near_domain_over_many_frames() {
        let mut s = scene(SceneConfig::bounded());
        for _ in 0..10_000 {
            s.update(1.0 / 60.0);
        }
        // One frame of overshoot at most: |v| * dt * scaling is well under 0.1.
        let limit = s.bound() + 0.1;
        assert!(s
            .sources()
            .iter()
            .all(|b| b.position.x.abs() <= limit && b.position.y.abs() <= limit));
    }

    #[test]
    fn params_reports_constants_and_sources() {
        let s = scene(SceneConfig::bounded());
        let params = s.params();
        assert_eq!(params["falloff"], "bounded");
        assert_eq!(params["render_size"], 100);
        assert_eq!(params["samples_per_frame"], 701 * 701);
        assert_eq!(params["sources"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn scene_trait_is_object_safe() {
        let mut boxed: Box<dyn Scene> = Box::new(scene(SceneConfig::unbounded()));
        boxed.update(0.0);
        assert!(!boxed.render().is_empty());
    }
}
