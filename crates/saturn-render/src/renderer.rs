//! Immediate-mode flat-color renderer.
//!
//! Callers set uniforms and issue draws one object at a time. Each draw
//! captures a snapshot of the current uniforms into a dynamic-offset arena;
//! [`FlatRenderer::prepare`] uploads the arena and [`FlatRenderer::replay`]
//! records every draw into a render pass in submission order.

use std::num::NonZeroU64;

use glam::{Mat4, Vec3};
use saturn_mesh::Mesh;

use crate::buffer::{MeshBuffer, MeshHandle, MeshStore};
use crate::shader::{ProgramSource, ShaderError, ShaderProgram};
use crate::uniforms::{FlatUniforms, ShaderUniforms, UniformStaging};

/// Mesh upload service.
pub trait MeshUploader {
    /// Transfer a mesh to the backend and return a handle for drawing it.
    fn upload(&mut self, label: &str, mesh: &Mesh) -> MeshHandle;
}

/// Draw submission against the active program.
///
/// `draw` uses whatever uniforms were set immediately before it. Meshes hold
/// no transform or color of their own.
pub trait DrawList: ShaderUniforms {
    fn draw(&mut self, mesh: MeshHandle);
}

#[derive(Debug, Clone, Copy)]
struct DrawCommand {
    mesh: MeshHandle,
    uniform_offset: u32,
}

struct UniformArena {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: u64,
}

impl UniformArena {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, slots: u64, stride: u64) -> Self {
        let capacity = slots.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("flat-uniform-arena"),
            size: capacity * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("flat-uniform-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(FlatUniforms::SIZE),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            capacity,
        }
    }
}

/// Owns the compiled program, every uploaded mesh and the per-frame draw list.
///
/// Dropping the renderer releases all GPU resources it created.
pub struct FlatRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    program: ShaderProgram,
    meshes: MeshStore,
    current: FlatUniforms,
    staging: UniformStaging,
    arena: UniformArena,
    commands: Vec<DrawCommand>,
}

impl FlatRenderer {
    /// Compile the program and set up an empty draw list.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: &ProgramSource,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Result<Self, ShaderError> {
        let program = ShaderProgram::compile(device, source, surface_format, depth_format)?;
        let staging = UniformStaging::new(device.limits().min_uniform_buffer_offset_alignment);
        let arena = UniformArena::new(device, &program.uniform_layout, 64, staging.stride());

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            program,
            meshes: MeshStore::new(),
            current: FlatUniforms::default(),
            staging,
            arena,
            commands: Vec::new(),
        })
    }

    /// Discard last frame's draws and staged uniforms.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.staging.clear();
    }

    /// Upload staged uniforms, growing the arena when the frame outgrew it.
    pub fn prepare(&mut self) {
        if self.staging.is_empty() {
            return;
        }

        let needed = self.staging.len() as u64;
        if needed > self.arena.capacity {
            let slots = needed.next_power_of_two();
            log::debug!("Growing uniform arena to {slots} slots");
            self.arena = UniformArena::new(
                &self.device,
                &self.program.uniform_layout,
                slots,
                self.staging.stride(),
            );
        }

        self.queue
            .write_buffer(&self.arena.buffer, 0, self.staging.as_bytes());
    }

    /// Record every draw of this frame into the pass.
    pub fn replay(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.commands.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.program.pipeline);
        for command in &self.commands {
            let Some(mesh) = self.meshes.get(command.mesh) else {
                continue;
            };
            render_pass.set_bind_group(0, &self.arena.bind_group, &[command.uniform_offset]);
            mesh.draw(render_pass);
        }
    }

    /// Number of draws recorded since [`begin_frame`](Self::begin_frame).
    pub fn draw_count(&self) -> usize {
        self.commands.len()
    }

    /// Number of meshes uploaded so far.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

impl MeshUploader for FlatRenderer {
    fn upload(&mut self, label: &str, mesh: &Mesh) -> MeshHandle {
        let handle = self
            .meshes
            .insert(MeshBuffer::upload(&self.device, label, mesh));
        log::debug!(
            "Uploaded mesh '{label}' ({} vertices, {} triangles) as {:?}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            handle
        );
        handle
    }
}

impl ShaderUniforms for FlatRenderer {
    fn set_matrix4(&mut self, name: &str, value: Mat4) {
        self.current.set_matrix4(name, value);
    }

    fn set_vector3(&mut self, name: &str, value: Vec3) {
        self.current.set_vector3(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.current.set_float(name, value);
    }
}

impl DrawList for FlatRenderer {
    fn draw(&mut self, mesh: MeshHandle) {
        if self.meshes.get(mesh).is_none() {
            log::warn!("Draw of unknown mesh {mesh:?} ignored");
            return;
        }
        let uniform_offset = self.staging.push(&self.current);
        self.commands.push(DrawCommand {
            mesh,
            uniform_offset,
        });
    }
}
