//! Window viewport tracking: physical size, zero-size clamping, and aspect ratio.

/// Minimum surface dimension (prevents zero-size panics).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

/// Current drawable area of the window.
///
/// Minimised windows report 0x0 on several platforms. The viewport clamps to
/// 1x1 so the surface can still be configured, and remembers it is minimised
/// so the frame can be skipped.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    width: u32,
    height: u32,
    minimized: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SURFACE_DIMENSION),
            height: height.max(MIN_SURFACE_DIMENSION),
            minimized: width == 0 || height == 0,
        }
    }

    /// Apply a window resize. Returns the new clamped size if it changed.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> Option<PhysicalSize> {
        self.minimized = width == 0 || height == 0;
        let width = width.max(MIN_SURFACE_DIMENSION);
        let height = height.max(MIN_SURFACE_DIMENSION);

        if width == self.width && height == self.height {
            return None;
        }

        self.width = width;
        self.height = height;
        Some(self.size())
    }

    pub fn size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Width over height, for the projection matrix.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Whether the last reported size had a zero dimension.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}
