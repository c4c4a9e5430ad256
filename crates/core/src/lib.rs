#![deny(unsafe_code)]
//! Core types for the metaballs animation.
//!
//! Provides the `Metaball` source model, the `Falloff` field evaluator, the
//! bounce `Integrator`, the `GridRenderer` threshold sampler, the two
//! `SceneConfig` presets and the `Scene` trait the viewer drives each frame.
//! Everything outside the optional `render` module is GPU-free and
//! deterministic.

pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod integrator;
pub mod scene;
pub mod source;

#[cfg(feature = "render")]
pub mod render;

pub use config::{PointStyle, SceneConfig};
pub use error::MetaballError;
pub use field::Falloff;
pub use grid::{Emission, GridRenderer};
pub use integrator::Integrator;
pub use scene::{Metaballs, Scene};
pub use source::Metaball;
