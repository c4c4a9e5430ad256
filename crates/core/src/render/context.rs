//! GL context wrapper.
//!
//! `GpuContext` owns the `glow::Context` for the window surface and records
//! which GLSL flavor shaders must be written in.

use super::GlFlavor;

/// Wraps a `glow::Context` with the facts the point renderer needs.
pub struct GpuContext {
    gl: glow::Context,
    flavor: GlFlavor,
    version: String,
}

impl GpuContext {
    /// Wraps `gl` and queries its version string.
    ///
    /// The flavor comes from the caller, which knows which API the context
    /// was requested with.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context, flavor: GlFlavor) -> Self {
        use glow::HasContext;

        // SAFETY: querying a string parameter on a current context.
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        tracing::debug!(%version, ?flavor, "GL context ready");

        Self {
            gl,
            flavor,
            version,
        }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// GLSL dialect to compile shaders for.
    pub fn flavor(&self) -> GlFlavor {
        self.flavor
    }

    /// Driver-reported `GL_VERSION` string.
    pub fn version(&self) -> &str {
        &self.version
    }
}
