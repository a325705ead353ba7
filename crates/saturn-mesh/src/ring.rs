//! Flat annulus tessellation.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Vertices emitted per angular slice: two triangles, not deduplicated.
pub const VERTICES_PER_SEGMENT: usize = 6;

/// Build a flat ring in the XY plane (Z = 0) as a non-indexed triangle list.
///
/// Each of the `segments` uniform slices contributes two triangles spanning
/// the inner and outer boundary at the slice's start and end angle.
pub fn build_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Result<Mesh, MeshError> {
    if !inner_radius.is_finite() || inner_radius < 0.0 {
        return Err(MeshError::invalid(
            "inner_radius",
            format!("must be finite and non-negative, got {inner_radius}"),
        ));
    }
    if !outer_radius.is_finite() || outer_radius <= inner_radius {
        return Err(MeshError::invalid(
            "outer_radius",
            format!("must be finite and greater than inner radius {inner_radius}, got {outer_radius}"),
        ));
    }
    if segments < 3 {
        return Err(MeshError::invalid(
            "segments",
            format!("need at least 3, got {segments}"),
        ));
    }

    let step = TAU / segments as f32;
    let mut positions = Vec::with_capacity(segments as usize * VERTICES_PER_SEGMENT);

    for i in 0..segments {
        let (sin1, cos1) = (i as f32 * step).sin_cos();
        let (sin2, cos2) = ((i + 1) as f32 * step).sin_cos();

        let start_inner = Vec3::new(inner_radius * cos1, inner_radius * sin1, 0.0);
        let start_outer = Vec3::new(outer_radius * cos1, outer_radius * sin1, 0.0);
        let end_outer = Vec3::new(outer_radius * cos2, outer_radius * sin2, 0.0);
        let end_inner = Vec3::new(inner_radius * cos2, inner_radius * sin2, 0.0);

        positions.extend_from_slice(&[
            start_inner,
            start_outer,
            end_outer,
            start_inner,
            end_outer,
            end_inner,
        ]);
    }

    Mesh::triangle_list(positions)
}
