//! wgpu rendering backend: surface management, shader program compilation,
//! mesh upload and the immediate-mode flat-color renderer.

pub mod buffer;
pub mod depth;
pub mod frame;
pub mod gpu;
pub mod projection;
pub mod renderer;
pub mod shader;
pub mod uniforms;
pub mod viewport;

pub use buffer::{MeshBuffer, MeshHandle, MeshStore, VertexPosition};
pub use depth::DepthTarget;
pub use frame::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use gpu::{GpuOptions, RenderContext, RenderContextError, SurfaceError, plan_surface};
pub use projection::Projection;
pub use renderer::{DrawList, FlatRenderer, MeshUploader};
pub use shader::{ProgramSource, ShaderError, ShaderProgram, ShaderStage, link, validate_stage};
pub use uniforms::{FlatUniforms, ShaderUniforms, UniformSlot, UniformStaging};
pub use viewport::{PhysicalSize, Viewport};
