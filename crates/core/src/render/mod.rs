//! OpenGL point rendering.
//!
//! This module is only available when the `render` feature is enabled.
//! It compiles the point shader for the active GL flavor, uploads each
//! frame's point list and draws it as `POINTS`.
//!
//! # Module overview
//!
//! - [`shader`] -- Shader compilation, linking, and error formatting.
//! - [`context`] -- GL context wrapper recording version and flavor.
//! - [`points`] -- Point shader sources and the per-frame point renderer.

pub mod context;
pub mod points;
pub mod shader;

pub use context::GpuContext;
pub use points::{clear, PointRenderer};
pub use shader::{
    compile_program, compile_shader, format_shader_error, link_program, ShaderError, ShaderStage,
};

/// Which GLSL dialect the current context speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlFlavor {
    /// Desktop OpenGL 3.3 core profile.
    Desktop,
    /// OpenGL ES 3.0.
    Embedded,
}

impl GlFlavor {
    /// Version directive (and default precision for ES) that opens every shader.
    pub fn shader_header(self) -> &'static str {
        match self {
            GlFlavor::Desktop => "#version 330 core\n",
            GlFlavor::Embedded => "#version 300 es\nprecision mediump float;\n",
        }
    }

    /// Prepends this flavor's header to a shader body.
    pub fn shader_source(self, body: &str) -> String {
        format!("{}{body}", self.shader_header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_header_targets_glsl_330_core() {
        assert!(GlFlavor::Desktop.shader_header().starts_with("#version 330 core"));
    }

    #[test]
    fn embedded_header_declares_precision() {
        let header = GlFlavor::Embedded.shader_header();
        assert!(header.starts_with("#version 300 es"));
        assert!(header.contains("precision mediump float;"));
    }

    #[test]
    fn shader_source_keeps_version_on_first_line() {
        let src = GlFlavor::Embedded.shader_source("void main() {}\n");
        assert_eq!(src.lines().next(), Some("#version 300 es"));
        assert!(src.ends_with("void main() {}\n"));
    }
}
