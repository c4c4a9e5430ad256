//! Error types for the metaballs core.

use thiserror::Error;

/// Errors produced while building or validating a scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetaballError {
    /// The grid resolution was zero, which would divide every sample by zero.
    #[error("invalid render size: grid resolution must be non-zero")]
    InvalidRenderSize,

    /// The domain scaling factor was zero, negative, or not finite.
    #[error("invalid scaling factor {0}: must be finite and positive")]
    InvalidScaling(f32),

    /// A scene was configured without any metaball sources.
    #[error("scene has no metaball sources")]
    NoSources,

    /// A variant name did not match any known preset.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}
