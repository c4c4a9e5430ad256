//! Shader compilation and linking for the point program.
//!
//! The compile and link functions need a live `glow::Context`; the error
//! formatting is pure string processing and is tested without a GPU.

use std::fmt;
use thiserror::Error;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `create_shader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors that can occur while building a shader program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        stage: ShaderStage,
        /// Numbered source followed by the driver's info log.
        log: String,
    },
    /// The program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
}

/// Numbers each line of `source` and appends the driver `log`.
///
/// Driver logs refer to line numbers, so the numbered listing makes them
/// readable in a terminal. Either input may be empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, _) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles one shader stage.
///
/// # Errors
///
/// Returns `ShaderError::CompileError` with a numbered listing if the GLSL
/// fails to compile. The shader object is deleted on failure.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. `stage.gl_enum()` is a valid
    // shader type and the handle is deleted on every failure path.
    let shader = unsafe {
        gl.create_shader(stage.gl_enum())
            .map_err(|log| ShaderError::CompileError { stage, log })?
    };

    let compiled = unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        gl.get_shader_compile_status(shader)
    };
    if compiled {
        return Ok(shader);
    }

    let info_log = unsafe { gl.get_shader_info_log(shader) };
    unsafe { gl.delete_shader(shader) };
    Err(ShaderError::CompileError {
        stage,
        log: format_shader_error(source, &info_log),
    })
}

/// Links a vertex and a fragment shader into a program.
///
/// Both shaders are detached after linking; the caller still owns them.
///
/// # Errors
///
/// Returns `ShaderError::LinkError` with the driver log if linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: both shader handles come from successful `compile_shader` calls;
    // the program is deleted if linking fails.
    let program = unsafe { gl.create_program().map_err(ShaderError::LinkError)? };

    let linked = unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.get_program_link_status(program)
    };
    if linked {
        return Ok(program);
    }

    let info_log = unsafe { gl.get_program_info_log(program) };
    unsafe { gl.delete_program(program) };
    Err(ShaderError::LinkError(info_log))
}

/// Compiles both stages and links them, deleting the intermediate shaders.
///
/// # Errors
///
/// Propagates the first compile or link failure.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(e) => {
            // SAFETY: `vertex` is a live handle from the call above.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    let program = link_program(gl, vertex, fragment);

    // SAFETY: the linked program keeps its own copy of the compiled stages.
    unsafe {
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
    }

    program
}
