//! Scene configuration and the two built-in presets.
//!
//! A [`SceneConfig`] fixes everything about an animation: which falloff
//! formula is used, how densely the domain is sampled, where sources start
//! and how points look on screen. [`SceneConfig::bounded`] is the reference
//! animation; [`SceneConfig::unbounded`] is the inverse-distance variant.

use crate::error::MetaballError;
use crate::field::Falloff;
use crate::grid::Emission;
use crate::source::Metaball;
use serde::{Deserialize, Serialize};

/// All available preset names.
const VARIANT_NAMES: &[&str] = &["bounded", "unbounded"];

/// Flat green used by both presets.
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// How emitted points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    /// Point diameter in pixels.
    pub size: f32,
    /// Linear RGB color in [0, 1].
    pub color: [f32; 3],
}

/// Complete description of a metaball animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub falloff: Falloff,
    pub emission: Emission,
    /// Samples per domain unit along each axis.
    pub render_size: u32,
    /// Domain half-width and velocity multiplier. `1.0` is the unscaled domain.
    pub scaling: f32,
    pub threshold: f32,
    pub style: PointStyle,
    pub sources: Vec<Metaball>,
}

/// Four sources on the quadrant diagonals with asymmetric velocities.
fn quadrant_sources(size: f32) -> Vec<Metaball> {
    vec![
        Metaball::new(0.25, 0.25, 0.27, 0.20, size),
        Metaball::new(-0.25, -0.25, 0.12, -0.21, size),
        Metaball::new(0.25, -0.25, -0.19, 0.13, size),
        Metaball::new(-0.25, 0.25, -0.21, -0.27, size),
    ]
}

impl SceneConfig {
    /// Quadratic falloff over a domain scaled by 3.5, with per-source emission.
    pub fn bounded() -> Self {
        Self {
            falloff: Falloff::Bounded,
            emission: Emission::PerSourceAndSum,
            render_size: 100,
            scaling: 3.5,
            threshold: 0.25,
            style: PointStyle {
                size: 5.0,
                color: GREEN,
            },
            sources: quadrant_sources(1.0),
        }
    }

    /// Inverse-distance falloff over the unit domain, emitting on the sum only.
    pub fn unbounded() -> Self {
        Self {
            falloff: Falloff::Unbounded,
            emission: Emission::SumOnly,
            render_size: 300,
            scaling: 1.0,
            threshold: 1.0,
            style: PointStyle {
                size: 2.0,
                color: GREEN,
            },
            sources: quadrant_sources(0.17),
        }
    }

    /// Looks up a preset by name.
    ///
    /// Returns `MetaballError::UnknownVariant` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, MetaballError> {
        match name {
            "bounded" => Ok(Self::bounded()),
            "unbounded" => Ok(Self::unbounded()),
            _ => Err(MetaballError::UnknownVariant(name.to_string())),
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        VARIANT_NAMES
    }

    /// Half-width of the domain sources bounce inside.
    pub fn bound(&self) -> f32 {
        self.scaling
    }

    /// Largest grid index sampled on each axis.
    pub fn loop_extent(&self) -> i32 {
        (self.render_size as f32 * self.scaling) as i32
    }

    /// Checks that the grid can be sampled and that there is something to draw.
    pub fn validate(&self) -> Result<(), MetaballError> {
        if self.render_size == 0 {
            return Err(MetaballError::InvalidRenderSize);
        }
        if !self.scaling.is_finite() || self.scaling <= 0.0 {
            return Err(MetaballError::InvalidScaling(self.scaling));
        }
        if self.sources.is_empty() {
            return Err(MetaballError::NoSources);
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::bounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_preset_matches_reference_constants() {
        let config = SceneConfig::bounded();
        assert_eq!(config.falloff, Falloff::Bounded);
        assert_eq!(config.emission, Emission::PerSourceAndSum);
        assert_eq!(config.render_size, 100);
        assert_eq!(config.scaling, 3.5);
        assert_eq!(config.threshold, 0.25);
        assert_eq!(config.style.size, 5.0);
        assert_eq!(config.style.color, [0.0, 1.0, 0.0]);
        assert_eq!(config.sources.len(), 4);
        assert!(config.sources.iter().all(|b| b.size == 1.0));
    }

    #[test]
    fn unbounded_preset_is_unscaled_with_unit_threshold() {
        let config = SceneConfig::unbounded();
        assert_eq!(config.falloff, Falloff::Unbounded);
        assert_eq!(config.emission, Emission::SumOnly);
        assert_eq!(config.render_size, 300);
        assert_eq!(config.bound(), 1.0);
        assert_eq!(config.threshold, 1.0);
        assert!(config.sources.iter().all(|b| b.size == 0.17));
    }

    #[test]
    fn presets_place_one_source_per_quadrant() {
        let sources = SceneConfig::bounded().sources;
        let mut quadrants: Vec<(bool, bool)> = sources
            .iter()
            .map(|b| (b.position.x > 0.0, b.position.y > 0.0))
            .collect();
        quadrants.sort();
        quadrants.dedup();
        assert_eq!(quadrants.len(), 4);
    }

    #[test]
    fn loop_extent_scales_render_size() {
        assert_eq!(SceneConfig::bounded().loop_extent(), 350);
        assert_eq!(SceneConfig::unbounded().loop_extent(), 300);
    }

    #[test]
    fn bound_follows_scaling() {
        assert_eq!(SceneConfig::bounded().bound(), 3.5);
    }

    #[test]
    fn from_name_resolves_every_listed_name() {
        for name in SceneConfig::list_names() {
            assert!(SceneConfig::from_name(name).is_ok(), "{name} did not resolve");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = SceneConfig::from_name("wobbly");
        assert_eq!(
            result,
            Err(MetaballError::UnknownVariant("wobbly".to_string()))
        );
    }

    #[test]
    fn default_is_bounded() {
        assert_eq!(SceneConfig::default(), SceneConfig::bounded());
    }

    #[test]
    fn validate_accepts_presets() {
        assert!(SceneConfig::bounded().validate().is_ok());
        assert!(SceneConfig::unbounded().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_render_size() {
        let config = SceneConfig {
            render_size: 0,
            ..SceneConfig::bounded()
        };
        assert_eq!(config.validate(), Err(MetaballError::InvalidRenderSize));
    }

    #[test]
    fn validate_rejects_non_positive_or_nan_scaling() {
        for scaling in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = SceneConfig {
                scaling,
                ..SceneConfig::unbounded()
            };
            assert!(
                matches!(config.validate(), Err(MetaballError::InvalidScaling(_))),
                "scaling {scaling} accepted"
            );
        }
    }

    #[test]
    fn validate_rejects_empty_sources() {
        let config = SceneConfig {
            sources: Vec::new(),
            ..SceneConfig::unbounded()
        };
        assert_eq!(config.validate(), Err(MetaballError::NoSources));
    }

    #[test]
    fn json_round_trip_preserves_preset() {
        let original = SceneConfig::bounded();
        let json = serde_json::to_string(&original).unwrap();
        let restored: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn json_uses_readable_enum_names() {
        let v = serde_json::to_value(SceneConfig::bounded()).unwrap();
        assert_eq!(v["falloff"], "bounded");
        assert_eq!(v["emission"], "per_source_and_sum");
    }
}
