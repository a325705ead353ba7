//! Vertex and index buffer management for uploaded meshes.

use bytemuck::{Pod, Zeroable};
use saturn_mesh::Mesh;
use wgpu::util::DeviceExt;

/// Position-only vertex consumed by the flat-color pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPosition {
    pub position: [f32; 3],
}

impl VertexPosition {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPosition>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Opaque reference to a mesh owned by a [`MeshStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

impl MeshHandle {
    /// Wrap a raw slot index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw slot index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// GPU buffers for one mesh. Index buffer is absent for triangle lists.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Upload a CPU mesh into new vertex (and index) buffers.
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices: Vec<VertexPosition> = mesh
            .position_data()
            .into_iter()
            .map(|position| VertexPosition { position })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = mesh.indices().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-indices")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: mesh.vertex_count() as u32,
            index_count: mesh.indices().map_or(0, |indices| indices.len() as u32),
        }
    }

    /// Bind the buffers and issue the draw. Uniforms must already be bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            None => render_pass.draw(0..self.vertex_count, 0..1),
        }
    }
}

/// Owns every uploaded mesh. Buffers are released when the store drops.
#[derive(Default)]
pub struct MeshStore {
    meshes: Vec<MeshBuffer>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a mesh buffer and hand back its handle.
    pub fn insert(&mut self, mesh: MeshBuffer) -> MeshHandle {
        let handle = MeshHandle::new(self.meshes.len() as u32);
        self.meshes.push(mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshBuffer> {
        self.meshes.get(handle.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
