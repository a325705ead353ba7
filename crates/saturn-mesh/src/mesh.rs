//! CPU-side triangle mesh shared by every generator.

use glam::Vec3;

use crate::error::MeshError;

/// A triangle list, optionally indexed.
///
/// Indexed meshes reference `positions` through `indices` (three per
/// triangle). Non-indexed meshes are drawn in vertex order, three vertices per
/// triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Build an indexed mesh, rejecting indices that do not address a vertex.
    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::invalid(
                "indices",
                format!("{} indices do not form whole triangles", indices.len()),
            ));
        }

        let vertex_count = positions.len();
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }

        Ok(Self {
            positions,
            indices: Some(indices),
        })
    }

    /// Build a non-indexed triangle list.
    pub fn triangle_list(positions: Vec<Vec3>) -> Result<Self, MeshError> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::invalid(
                "positions",
                format!("{} vertices do not form whole triangles", positions.len()),
            ));
        }
        Ok(Self {
            positions,
            indices: None,
        })
    }

    /// Vertex positions in draw or index order.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, if the mesh is indexed.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Whether draws should go through an index buffer.
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles the mesh draws.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Positions flattened to `[x, y, z]` triples, ready for a vertex buffer.
    pub fn position_data(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }
}
