//! Reverse-Z depth attachment.
//!
//! The near plane maps to 1.0 and the far plane to 0.0, so the buffer clears
//! to 0.0 and closer fragments win with `GreaterEqual`.

use crate::viewport::PhysicalSize;

/// Depth texture sized to the surface.
pub struct DepthTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    size: PhysicalSize,
}

impl DepthTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Far plane in reverse-Z.
    pub const CLEAR_VALUE: f32 = 0.0;

    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::GreaterEqual;

    pub fn new(device: &wgpu::Device, size: PhysicalSize) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("saturn-depth"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            size,
        }
    }

    /// Recreate the texture for a new surface size. No-op if unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize) {
        if self.size != size {
            *self = Self::new(device, size);
        }
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_device() -> Option<wgpu::Device> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    force_fallback_adapter: false,
                    compatible_surface: None,
                })
                .await
                .ok()?;
            let (device, _queue) = adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()?;
            Some(device)
        })
    }

    #[test]
    fn test_reverse_z_constants() {
        assert_eq!(DepthTarget::FORMAT, wgpu::TextureFormat::Depth32Float);
        assert_eq!(DepthTarget::CLEAR_VALUE, 0.0);
        assert_eq!(
            DepthTarget::COMPARE_FUNCTION,
            wgpu::CompareFunction::GreaterEqual
        );
    }

    #[test]
    fn test_depth_matches_surface_size() {
        let Some(device) = create_test_device() else {
            return;
        };
        let size = PhysicalSize {
            width: 1280,
            height: 720,
        };
        let depth = DepthTarget::new(&device, size);
        assert_eq!(depth.size(), size);
        assert_eq!(depth.texture.width(), 1280);
        assert_eq!(depth.texture.height(), 720);
    }

    #[test]
    fn test_resize_recreates_texture() {
        let Some(device) = create_test_device() else {
            return;
        };
        let mut depth = DepthTarget::new(
            &device,
            PhysicalSize {
                width: 800,
                height: 600,
            },
        );
        depth.resize(
            &device,
            PhysicalSize {
                width: 1920,
                height: 1080,
            },
        );
        assert_eq!(depth.texture.width(), 1920);
        assert_eq!(depth.texture.height(), 1080);
    }
}
