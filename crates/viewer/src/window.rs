//! Window, GL context and surface ownership.
//!
//! [`GlBackend`] is acquired once after the event loop resumes and holds
//! every windowing and GPU resource the viewer uses. Dropping it deletes the
//! GL objects first and then tears down surface, context and window, so the
//! same release path runs on normal exit and on errors.

use crate::error::ViewerError;
use glam::Vec2;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, NotCurrentGlContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use metaballs_core::render::{self, GlFlavor, GpuContext, PointRenderer};
use metaballs_core::PointStyle;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::num::NonZeroU32;
use tracing::{info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

/// Title shown in the window decoration.
pub const WINDOW_TITLE: &str = "Metaballs";
/// Width and height of the square window in physical pixels.
pub const WINDOW_SIZE: u32 = 600;

/// Top-left corner that centers a window of `window` size on a monitor.
pub fn centered_origin(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (i64::from(monitor) - i64::from(window)) / 2;
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor_size.width, window.width) as i32,
        monitor_origin.y + offset(monitor_size.height, window.height) as i32,
    )
}

/// Everything needed to draw into the window.
///
/// Field order is drop order: GL wrapper, surface, context, window.
pub struct GlBackend {
    points: Option<PointRenderer>,
    gpu: GpuContext,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlBackend {
    /// Creates the hidden window, makes a GL context current on it, builds
    /// the point renderer and only then shows the window.
    ///
    /// # Errors
    ///
    /// `ViewerError::Backend` if the window, display, context or surface
    /// cannot be created; `ViewerError::Render` if the point renderer fails.
    #[allow(unsafe_code)]
    pub fn create(event_loop: &ActiveEventLoop) -> Result<Self, ViewerError> {
        let size = PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE);
        let mut attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_resizable(false)
            .with_visible(false);
        match event_loop.primary_monitor() {
            Some(monitor) => {
                let origin = centered_origin(monitor.position(), monitor.size(), size);
                attributes = attributes.with_position(origin);
            }
            None => warn!("no primary monitor reported; leaving window placement to the platform"),
        }

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| ViewerError::backend("create window", e))?;
        let window = window
            .ok_or_else(|| ViewerError::Backend("display builder returned no window".into()))?;

        let raw_handle = window
            .window_handle()
            .map_err(|e| ViewerError::backend("window handle", e))?
            .as_raw();
        let display = config.display();
        let (not_current, flavor) = create_context(&display, &config, raw_handle)?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| ViewerError::backend("surface attributes", e))?;
        // SAFETY: the surface is created for `window`, which `GlBackend` owns
        // and drops after the surface.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(|e| ViewerError::backend("create surface", e))?;
        let context = not_current
            .make_current(&surface)
            .map_err(|e| ViewerError::backend("make context current", e))?;

        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            warn!("could not enable vsync: {e}");
        }

        // SAFETY: the loader resolves symbols from the display whose context
        // was just made current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        let gpu = GpuContext::new(gl, flavor);
        let points = PointRenderer::new(&gpu).map_err(ViewerError::Render)?;
        info!(version = gpu.version(), ?flavor, "GL context created");

        window.set_visible(true);

        Ok(Self {
            points: Some(points),
            gpu,
            surface,
            context,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Clears the surface to black.
    pub fn clear(&self) {
        let size = self.window.inner_size();
        render::clear(self.gpu.gl(), size.width, size.height);
    }

    /// Draws `points` in domain coordinates, mapping `±bound` to the window edges.
    pub fn draw_points(&mut self, points: &[Vec2], style: &PointStyle, bound: f32) {
        if let Some(renderer) = self.points.as_mut() {
            renderer.draw(self.gpu.gl(), points, style, 1.0 / bound);
        }
    }

    /// Swaps buffers; blocks for vsync when it is enabled.
    pub fn present(&self) -> Result<(), ViewerError> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| ViewerError::backend("swap buffers", e))
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        if let Some(points) = self.points.take() {
            points.destroy(self.gpu.gl());
        }
        info!("GL resources released");
    }
}

/// Prefers the config with the fewest multisample buffers; points are drawn
/// as hard squares and gain nothing from MSAA.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .min_by_key(|config| config.num_samples())
        // glutin reports an error instead of calling the picker when no
        // config matches the template.
        .expect("GL display offered no configs")
}

/// Requests an OpenGL 3.3 core context, falling back to OpenGL ES 3.0.
#[allow(unsafe_code)]
fn create_context(
    display: &Display,
    config: &Config,
    raw_handle: RawWindowHandle,
) -> Result<(NotCurrentContext, GlFlavor), ViewerError> {
    let desktop = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .build(Some(raw_handle));
    let embedded = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
        .build(Some(raw_handle));

    // SAFETY: `raw_handle` belongs to a live window that outlives the context.
    match unsafe { display.create_context(config, &desktop) } {
        Ok(context) => Ok((context, GlFlavor::Desktop)),
        Err(desktop_err) => {
            warn!("OpenGL 3.3 core unavailable ({desktop_err}); trying OpenGL ES 3.0");
            unsafe { display.create_context(config, &embedded) }
                .map(|context| (context, GlFlavor::Embedded))
                .map_err(|e| ViewerError::backend("create GL context", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_origin_on_primary_at_zero() {
        let origin = centered_origin(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(600, 600),
        );
        assert_eq!(origin, PhysicalPosition::new(660, 240));
    }

    #[test]
    fn centered_origin_respects_monitor_offset() {
        let origin = centered_origin(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(2560, 1440),
            PhysicalSize::new(600, 600),
        );
        assert_eq!(origin, PhysicalPosition::new(1920 + 980, -200 + 420));
    }

    #[test]
    fn centered_origin_goes_negative_on_tiny_monitor() {
        let origin = centered_origin(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(400, 400),
            PhysicalSize::new(600, 600),
        );
        assert_eq!(origin, PhysicalPosition::new(-100, -100));
    }

    #[test]
    fn window_is_square_600() {
        assert_eq!(WINDOW_SIZE, 600);
        assert_eq!(WINDOW_TITLE, "Metaballs");
    }

    #[test]
    #[ignore = "requires a display server"]
    fn create_opens_window_with_current_context() {
        // Would test: GlBackend::create(event_loop) succeeds and the window
        // reports an inner size of 600x600.
    }
}
