//! Per-draw uniform block and its name-based setters.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Uniform block shared by the flat-color vertex and fragment stages.
///
/// Layout matches the WGSL `Uniforms` struct: three column-major matrices, a
/// `vec3` color and a trailing float that packs into the vec3's padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FlatUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub object_color: [f32; 3],
    pub brightness: f32,
}

impl FlatUniforms {
    /// Size of the block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

impl Default for FlatUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            object_color: [1.0; 3],
            brightness: 1.0,
        }
    }
}

/// A named field of [`FlatUniforms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    Model,
    View,
    Projection,
    ObjectColor,
    Brightness,
}

impl UniformSlot {
    /// Resolve a uniform by the name the shaders expose it under.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "model" => Some(Self::Model),
            "view" => Some(Self::View),
            "projection" => Some(Self::Projection),
            "objectColor" | "object_color" => Some(Self::ObjectColor),
            "brightness" => Some(Self::Brightness),
            _ => None,
        }
    }
}

/// Immediate-mode uniform setters of the active program.
///
/// Unknown names are ignored, like writing to an unresolved uniform location.
pub trait ShaderUniforms {
    fn set_matrix4(&mut self, name: &str, value: Mat4);
    fn set_vector3(&mut self, name: &str, value: Vec3);
    fn set_float(&mut self, name: &str, value: f32);
}

impl ShaderUniforms for FlatUniforms {
    fn set_matrix4(&mut self, name: &str, value: Mat4) {
        let cols = value.to_cols_array_2d();
        match UniformSlot::from_name(name) {
            Some(UniformSlot::Model) => self.model = cols,
            Some(UniformSlot::View) => self.view = cols,
            Some(UniformSlot::Projection) => self.projection = cols,
            _ => log::debug!("Ignoring matrix uniform '{name}'"),
        }
    }

    fn set_vector3(&mut self, name: &str, value: Vec3) {
        match UniformSlot::from_name(name) {
            Some(UniformSlot::ObjectColor) => self.object_color = value.to_array(),
            _ => log::debug!("Ignoring vector uniform '{name}'"),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        match UniformSlot::from_name(name) {
            Some(UniformSlot::Brightness) => self.brightness = value,
            _ => log::debug!("Ignoring float uniform '{name}'"),
        }
    }
}

/// CPU staging for a dynamic-offset uniform buffer.
///
/// Each pushed block lands on its own `stride`-aligned slot so it can be
/// selected per draw with a dynamic offset.
#[derive(Debug)]
pub struct UniformStaging {
    stride: u64,
    bytes: Vec<u8>,
}

impl UniformStaging {
    /// Create staging whose slots honor the device's offset alignment.
    pub fn new(min_offset_alignment: u32) -> Self {
        let align = u64::from(min_offset_alignment.max(1));
        Self {
            stride: FlatUniforms::SIZE.div_ceil(align) * align,
            bytes: Vec::new(),
        }
    }

    /// Append a block and return its byte offset.
    pub fn push(&mut self, uniforms: &FlatUniforms) -> u32 {
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(bytemuck::bytes_of(uniforms));
        self.bytes.resize(offset + self.stride as usize, 0);
        offset as u32
    }

    /// Drop all staged blocks, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Distance between consecutive slots in bytes.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of staged blocks.
    pub fn len(&self) -> usize {
        (self.bytes.len() as u64 / self.stride) as usize
    }

    /// Whether nothing has been staged since the last clear.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Staged bytes, ready for `Queue::write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_size_matches_wgsl_layout() {
        assert_eq!(FlatUniforms::SIZE, 208);
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(UniformSlot::from_name("model"), Some(UniformSlot::Model));
        assert_eq!(UniformSlot::from_name("view"), Some(UniformSlot::View));
        assert_eq!(
            UniformSlot::from_name("projection"),
            Some(UniformSlot::Projection)
        );
        assert_eq!(
            UniformSlot::from_name("objectColor"),
            Some(UniformSlot::ObjectColor)
        );
        assert_eq!(
            UniformSlot::from_name("brightness"),
            Some(UniformSlot::Brightness)
        );
        assert_eq!(UniformSlot::from_name("lightDir"), None);
    }

    #[test]
    fn test_setters_write_named_fields() {
        let mut uniforms = FlatUniforms::default();
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        uniforms.set_matrix4("model", model);
        uniforms.set_vector3("objectColor", Vec3::new(1.0, 0.9, 0.6));
        uniforms.set_float("brightness", 0.5);

        assert_eq!(uniforms.model, model.to_cols_array_2d());
        assert_eq!(uniforms.object_color, [1.0, 0.9, 0.6]);
        assert_eq!(uniforms.brightness, 0.5);
    }

    #[test]
    fn test_unknown_or_mistyped_names_are_ignored() {
        let mut uniforms = FlatUniforms::default();
        let before = uniforms;

        uniforms.set_matrix4("objectColor", Mat4::ZERO);
        uniforms.set_vector3("model", Vec3::ZERO);
        uniforms.set_float("missing", 3.0);

        assert_eq!(uniforms, before);
    }

    #[test]
    fn test_staging_aligns_slots() {
        let mut staging = UniformStaging::new(256);
        assert_eq!(staging.stride(), 256);

        let first = staging.push(&FlatUniforms::default());
        let second = staging.push(&FlatUniforms::default());

        assert_eq!(first, 0);
        assert_eq!(second, 256);
        assert_eq!(staging.len(), 2);
        assert_eq!(staging.as_bytes().len(), 512);
    }

    #[test]
    fn test_staging_stride_never_below_block_size() {
        let staging = UniformStaging::new(16);
        assert_eq!(staging.stride(), 208);
    }

    #[test]
    fn test_staging_clear() {
        let mut staging = UniformStaging::new(256);
        staging.push(&FlatUniforms::default());
        staging.clear();
        assert!(staging.is_empty());
        assert_eq!(staging.push(&FlatUniforms::default()), 0);
    }

    #[test]
    fn test_staged_bytes_hold_the_block() {
        let mut staging = UniformStaging::new(256);
        let mut uniforms = FlatUniforms::default();
        uniforms.brightness = 0.25;
        staging.push(&uniforms);

        let block: FlatUniforms =
            bytemuck::pod_read_unaligned(&staging.as_bytes()[..FlatUniforms::SIZE as usize]);
        assert_eq!(block.brightness, 0.25);
    }
}
