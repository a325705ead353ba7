//! wgpu device and window surface.
//!
//! [`RenderContext::open_blocking`] picks an adapter for the window, opens a
//! device and configures the swap chain. Surface choices (format, present
//! mode, alpha) are made by [`plan_surface`], which needs no GPU.

use std::sync::Arc;
use winit::window::Window;

/// Failure while bringing up the GPU.
#[derive(Debug, thiserror::Error)]
pub enum RenderContextError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// The adapter reported an empty capability list for the surface.
    #[error("surface offers no {0}")]
    UnsupportedSurface(&'static str),
}

/// Why no frame could be acquired this redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Still unusable after one reconfigure; the caller should resize.
    #[error("surface lost")]
    Lost,

    #[error("out of memory")]
    OutOfMemory,

    /// Skip this frame and try again.
    #[error("timeout")]
    Timeout,
}

/// Startup choices for [`RenderContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuOptions {
    pub backends: wgpu::Backends,
    pub vsync: bool,
}

/// Device, queue and the configured window surface.
pub struct RenderContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Color format of the swap chain; pipelines must target it.
    pub surface_format: wgpu::TextureFormat,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Bring up the GPU for `window`.
    pub async fn open(window: Arc<Window>, options: GpuOptions) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: options.backends,
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance.create_surface(window)?;
        let (adapter, device, queue) = open_device(&instance, &surface).await?;

        let caps = surface.get_capabilities(&adapter);
        let surface_config = plan_surface(
            &caps.formats,
            &caps.present_modes,
            &caps.alpha_modes,
            (size.width, size.height),
            options.vsync,
        )?;
        log::debug!(
            "Surface {}x{} {:?} {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );
        surface.configure(&device, &surface_config);

        Ok(Self {
            device,
            queue,
            surface_format: surface_config.format,
            surface,
            surface_config,
        })
    }

    /// [`open`](Self::open) on the calling thread.
    pub fn open_blocking(
        window: Arc<Window>,
        options: GpuOptions,
    ) -> Result<Self, RenderContextError> {
        pollster::block_on(Self::open(window, options))
    }

    /// Follow a window resize. Zero extents (minimized) are raised to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Next swap chain image, reconfiguring once on a lost or stale surface.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        let err = match self.surface.get_current_texture() {
            Ok(texture) => return Ok(texture),
            Err(err) => err,
        };
        match recovery_for(&err) {
            Recovery::Reconfigure => {
                log::warn!("Surface {err:?}, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|_| SurfaceError::Lost)
            }
            Recovery::Fail(reason) => {
                if matches!(err, wgpu::SurfaceError::Other) {
                    log::error!("Unrecognized surface error");
                }
                Err(reason)
            }
        }
    }
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), RenderContextError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|_| RenderContextError::NoAdapter)?;

    let info = adapter.get_info();
    log::info!(
        "GPU adapter: {} on {:?} ({:?})",
        info.name,
        info.backend,
        info.device_type
    );

    // Flat-color drawing needs nothing beyond the baseline.
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("saturn-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        })
        .await?;
    Ok((adapter, device, queue))
}

/// Build the swap chain configuration from what the surface supports.
pub fn plan_surface(
    formats: &[wgpu::TextureFormat],
    present_modes: &[wgpu::PresentMode],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    (width, height): (u32, u32),
    vsync: bool,
) -> Result<wgpu::SurfaceConfiguration, RenderContextError> {
    let format = pick_format(formats).ok_or(RenderContextError::UnsupportedSurface("formats"))?;
    let alpha_mode = alpha_modes
        .iter()
        .copied()
        .find(|mode| *mode == wgpu::CompositeAlphaMode::Opaque)
        .or_else(|| alpha_modes.first().copied())
        .ok_or(RenderContextError::UnsupportedSurface("alpha modes"))?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: pick_present_mode(present_modes, vsync),
        alpha_mode,
        view_formats: Vec::new(),
        desired_maximum_frame_latency: 2,
    })
}

/// sRGB so the shader's linear colors are encoded on write. BGRA first.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    const PREFERRED: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    PREFERRED
        .into_iter()
        .find(|format| formats.contains(format))
        .or_else(|| formats.iter().copied().find(|format| format.is_srgb()))
        .or_else(|| formats.first().copied())
}

/// Fifo when vsync is on; otherwise the lowest-latency mode offered.
fn pick_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recovery {
    Reconfigure,
    Fail(SurfaceError),
}

fn recovery_for(err: &wgpu::SurfaceError) -> Recovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Recovery::Reconfigure,
        wgpu::SurfaceError::Timeout => Recovery::Fail(SurfaceError::Timeout),
        wgpu::SurfaceError::OutOfMemory => Recovery::Fail(SurfaceError::OutOfMemory),
        wgpu::SurfaceError::Other => Recovery::Fail(SurfaceError::Lost),
    }
}
