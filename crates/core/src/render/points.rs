//! Per-frame point drawing.
//!
//! [`PointRenderer`] streams a frame's points into a dynamic vertex buffer and
//! draws them as `POINTS` with a flat color and a fixed pixel size. Domain
//! coordinates are mapped to clip space by a uniform scale of `1 / bound`.

use super::shader::compile_program;
use super::{GlFlavor, GpuContext};
use crate::config::PointStyle;
use glam::Vec2;

/// Vertex shader body; the version header comes from [`GlFlavor`].
pub const POINT_VERTEX_BODY: &str = r#"layout(location = 0) in vec2 a_position;
uniform float u_scale;
uniform float u_point_size;
void main() {
    gl_Position = vec4(a_position * u_scale, 0.0, 1.0);
    gl_PointSize = u_point_size;
}
"#;

/// Fragment shader body; the version header comes from [`GlFlavor`].
pub const POINT_FRAGMENT_BODY: &str = r#"uniform vec3 u_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(u_color, 1.0);
}
"#;

/// Bytes per vertex: one `vec2` of `f32`.
const VERTEX_STRIDE: usize = std::mem::size_of::<Vec2>();

/// Vertex capacity to allocate so that `needed` points fit.
///
/// Grows to the next power of two and never shrinks, so a steady animation
/// stops reallocating after the first few frames.
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}

/// GPU objects for drawing point lists.
pub struct PointRenderer {
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    u_scale: Option<glow::UniformLocation>,
    u_point_size: Option<glow::UniformLocation>,
    u_color: Option<glow::UniformLocation>,
    flavor: GlFlavor,
    capacity: usize,
}

impl PointRenderer {
    /// Compiles the point program and creates an empty vertex buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shaders fail to build or the vertex array or
    /// buffer cannot be created. Objects created before the failure are
    /// released.
    #[allow(unsafe_code)]
    pub fn new(ctx: &GpuContext) -> Result<Self, String> {
        use glow::HasContext;

        let gl = ctx.gl();
        let flavor = ctx.flavor();
        let program = compile_program(
            gl,
            &flavor.shader_source(POINT_VERTEX_BODY),
            &flavor.shader_source(POINT_FRAGMENT_BODY),
        )
        .map_err(|e| e.to_string())?;

        // SAFETY: glow wraps raw GL calls as unsafe. Every handle used below
        // was created on this context, and each error path deletes what was
        // created before it.
        let vao = match unsafe { gl.create_vertex_array() } {
            Ok(vao) => vao,
            Err(e) => {
                unsafe { gl.delete_program(program) };
                return Err(e);
            }
        };
        let vbo = match unsafe { gl.create_buffer() } {
            Ok(vbo) => vbo,
            Err(e) => {
                unsafe {
                    gl.delete_vertex_array(vao);
                    gl.delete_program(program);
                }
                return Err(e);
            }
        };

        let (u_scale, u_point_size, u_color) = unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, VERTEX_STRIDE as i32, 0);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            (
                gl.get_uniform_location(program, "u_scale"),
                gl.get_uniform_location(program, "u_point_size"),
                gl.get_uniform_location(program, "u_color"),
            )
        };

        Ok(Self {
            program,
            vao,
            vbo,
            u_scale,
            u_point_size,
            u_color,
            flavor,
            capacity: 0,
        })
    }

    /// Vertex capacity of the current buffer allocation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Uploads `points` and draws them with `style`.
    ///
    /// `scale` maps domain coordinates to clip space; pass `1 / bound` so the
    /// whole domain fills the viewport.
    #[allow(unsafe_code)]
    pub fn draw(&mut self, gl: &glow::Context, points: &[Vec2], style: &PointStyle, scale: f32) {
        use glow::HasContext;

        if points.is_empty() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(points);
        let capacity = grown_capacity(self.capacity, points.len());

        // SAFETY: program, VAO and VBO are live handles from `new`; the
        // buffer is (re)allocated before any sub-data upload that needs it.
        unsafe {
            if self.flavor == GlFlavor::Desktop {
                gl.enable(glow::PROGRAM_POINT_SIZE);
            }
            gl.use_program(Some(self.program));
            gl.uniform_1_f32(self.u_scale.as_ref(), scale);
            gl.uniform_1_f32(self.u_point_size.as_ref(), style.size);
            let [r, g, b] = style.color;
            gl.uniform_3_f32(self.u_color.as_ref(), r, g, b);

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            if capacity != self.capacity {
                gl.buffer_data_size(
                    glow::ARRAY_BUFFER,
                    (capacity * VERTEX_STRIDE) as i32,
                    glow::DYNAMIC_DRAW,
                );
            }
            gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, bytes);
            gl.draw_arrays(glow::POINTS, 0, points.len() as i32);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }

        if capacity != self.capacity {
            tracing::trace!(from = self.capacity, to = capacity, "grew point buffer");
            self.capacity = capacity;
        }
    }

    /// Deletes the program, vertex array and buffer.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: the handles are owned by `self`, which is consumed here.
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
            gl.delete_program(self.program);
        }
    }
}

/// Sets the viewport and clears color and depth to transparent black.
#[allow(unsafe_code)]
pub fn clear(gl: &glow::Context, width: u32, height: u32) {
    use glow::HasContext;

    // SAFETY: plain state calls on the current context.
    unsafe {
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }
}
