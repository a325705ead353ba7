//! Procedural geometry for the ringed-planet scene: UV spheres and flat annular rings.

mod error;
mod mesh;
mod ring;
mod sphere;

pub use error::MeshError;
pub use mesh::Mesh;
pub use ring::{VERTICES_PER_SEGMENT, build_ring};
pub use sphere::build_sphere;
