//! UV-sphere tessellation.
//!
//! Vertices are laid out stack by stack from the north pole (+Z) to the south
//! pole (-Z). Each stack holds `sectors + 1` vertices so the longitude seam is
//! sampled twice at matching positions, which keeps the index pattern uniform.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Build an indexed UV sphere of the given radius centered on the origin.
///
/// Produces `(stacks + 1) * (sectors + 1)` vertices and
/// `2 * sectors * (stacks - 1)` triangles. The cells touching a pole emit
/// only one triangle each, so no degenerate triangles are generated.
pub fn build_sphere(radius: f32, sectors: u32, stacks: u32) -> Result<Mesh, MeshError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::invalid(
            "radius",
            format!("must be finite and positive, got {radius}"),
        ));
    }
    if sectors < 3 {
        return Err(MeshError::invalid(
            "sectors",
            format!("need at least 3, got {sectors}"),
        ));
    }
    if stacks < 2 {
        return Err(MeshError::invalid(
            "stacks",
            format!("need at least 2, got {stacks}"),
        ));
    }

    let row = sectors as u64 + 1;
    let vertex_count = (stacks as u64 + 1) * row;
    if vertex_count > u32::MAX as u64 {
        return Err(MeshError::invalid(
            "sectors",
            format!("{sectors}x{stacks} tessellation exceeds 32-bit indices"),
        ));
    }

    let mut positions = Vec::with_capacity(vertex_count as usize);
    let stack_step = PI / stacks as f32;
    let sector_step = TAU / sectors as f32;

    for i in 0..=stacks {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            positions.push(Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z));
        }
    }

    let triangle_count = 2 * sectors as usize * (stacks as usize - 1);
    let mut indices = Vec::with_capacity(triangle_count * 3);

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            if i != 0 {
                indices.extend_from_slice(&[k1, k1 + 1, k2]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2 + 1, k2]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    Mesh::indexed(positions, indices)
}
