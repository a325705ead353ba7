//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU state on resume, folds keyboard events into
//! [`KeyboardState`], and runs one update + render per redraw.

use std::sync::Arc;

use saturn_config::Config;
use saturn_input::KeyboardState;
use saturn_render::{
    DepthTarget, FlatRenderer, FrameEncoder, GpuOptions, ProgramSource, RenderContext,
    RenderPassBuilder, SurfaceError, Viewport,
};
use saturn_scene::{Simulation, SystemCatalog};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::frame_clock::{FrameClock, STATS_INTERVAL};
use crate::mapping::{clear_color, control_input, scene_settings};
use crate::platform::preferred_backends;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Everything that exists only while a window is open.
///
/// Field order is drop order: GPU resources first, the window last.
struct Graphics {
    simulation: Simulation,
    renderer: FlatRenderer,
    depth: DepthTarget,
    context: RenderContext,
    window: Arc<Window>,
}

impl Graphics {
    /// Record the scene, then encode and present one frame.
    fn render_frame(&mut self, aspect: f32, clear: wgpu::Color) -> Result<(), SurfaceError> {
        self.renderer.begin_frame();
        self.simulation.render(&mut self.renderer, aspect);
        self.renderer.prepare();

        let surface_texture = self.context.get_current_texture()?;
        let mut frame = FrameEncoder::new(&self.context.device, &self.context.queue, surface_texture);
        let pass_builder = RenderPassBuilder::new()
            .label("scene-pass")
            .clear_color(clear)
            .depth(&self.depth);
        {
            let mut pass = frame.begin_render_pass(&pass_builder);
            self.renderer.replay(&mut pass);
        }
        frame.submit();
        Ok(())
    }
}

/// Application state driven by the winit event loop.
pub struct AppState {
    config: Config,
    catalog: SystemCatalog,
    viewport: Viewport,
    keyboard: KeyboardState,
    clock: FrameClock,
    graphics: Option<Graphics>,
    exit_error: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let viewport = Viewport::new(config.window.width, config.window.height);
        Self {
            config,
            catalog: SystemCatalog::saturn(),
            viewport,
            keyboard: KeyboardState::new(),
            clock: FrameClock::new(),
            graphics: None,
            exit_error: None,
        }
    }

    /// Current surface size in physical pixels.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the window and GPU state exist.
    pub fn is_running(&self) -> bool {
        self.graphics.is_some()
    }

    /// Error that stopped the event loop, if any.
    pub fn take_exit_error(&mut self) -> Option<AppError> {
        self.exit_error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.exit_error = Some(err);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics, AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);

        let inner_size = window.inner_size();
        self.viewport = Viewport::new(inner_size.width, inner_size.height);
        info!(
            "Window created: {}x{} (scale: {:.2})",
            inner_size.width,
            inner_size.height,
            window.scale_factor()
        );

        let context = RenderContext::open_blocking(
            window.clone(),
            GpuOptions {
                backends: preferred_backends(),
                vsync: self.config.render.vsync,
            },
        )?;
        let depth = DepthTarget::new(&context.device, self.viewport.size());

        let source = match &self.config.render.shader_dir {
            Some(dir) => {
                info!("Loading shaders from {}", dir.display());
                ProgramSource::load_from_dir(dir)?
            }
            None => ProgramSource::embedded(),
        };
        let mut renderer = FlatRenderer::new(
            &context.device,
            &context.queue,
            &source,
            context.surface_format,
            Some(DepthTarget::FORMAT),
        )?;

        let simulation =
            Simulation::build(&mut renderer, &self.catalog, scene_settings(&self.config))?;
        info!(
            "Scene ready: {} rings, {} moons, {} meshes",
            simulation.rings().len(),
            simulation.moons().len(),
            renderer.mesh_count()
        );

        Ok(Graphics {
            simulation,
            renderer,
            depth,
            context,
            window,
        })
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        let Some(size) = self.viewport.handle_resize(width, height) else {
            return;
        };
        if let Some(graphics) = &mut self.graphics {
            graphics.context.resize(size.width, size.height);
            graphics.depth.resize(&graphics.context.device, size);
        }
        debug!("Surface resized to {}x{}", size.width, size.height);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let input = control_input(&self.keyboard);
        graphics.simulation.update(dt, &input);
        self.keyboard.end_frame();

        if !self.viewport.is_minimized() {
            let clear = clear_color(&self.config);
            match graphics.render_frame(self.viewport.aspect_ratio(), clear) {
                Ok(()) => {}
                Err(SurfaceError::Lost) => {
                    let size = self.viewport.size();
                    graphics.context.resize(size.width, size.height);
                }
                Err(SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory");
                    self.exit_error = Some(AppError::OutOfMemory);
                    event_loop.exit();
                    return;
                }
                Err(SurfaceError::Timeout) => {
                    warn!("Surface timeout, skipping frame");
                }
            }
        }

        if self.config.debug.log_frame_stats
            && let Some(stats) = self.clock.take_stats(STATS_INTERVAL)
        {
            let state = graphics.simulation.state();
            info!(
                fps = stats.fps,
                time_scale = state.time_scale,
                planet_rotation = state.planet_rotation,
                "Frame stats over {} frames",
                stats.frames
            );
        }

        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
                self.clock.reset();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources go before the event loop tears the window down
        self.graphics = None;
    }
}

/// Creates an event loop and runs the simulator until the window is closed.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_exit_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_viewport_follows_config() {
        let mut config = Config::default();
        config.window.width = 800;
        config.window.height = 600;
        let state = AppState::new(config);
        assert_eq!(state.viewport().size().width, 800);
        assert_eq!(state.viewport().size().height, 600);
    }

    #[test]
    fn test_app_state_starts_without_window() {
        let mut state = AppState::new(Config::default());
        assert!(!state.is_running());
        assert!(state.take_exit_error().is_none());
    }

    #[test]
    fn test_resize_without_window_tracks_viewport() {
        let mut state = AppState::new(Config::default());
        state.handle_resize(1920, 1080);
        assert_eq!(state.viewport().size().width, 1920);
        assert_eq!(state.viewport().size().height, 1080);
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Saturn 3D");
        assert!(attrs.fullscreen.is_some());
    }
}
