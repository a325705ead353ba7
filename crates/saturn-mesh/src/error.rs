//! Mesh construction error types.

/// Errors produced when mesh construction parameters are out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A construction parameter is outside its valid domain.
    #[error("invalid {what}: {reason}")]
    InvalidParameter {
        /// The offending parameter.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// An index does not address a vertex of the mesh.
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The bad index value.
        index: u32,
        /// Where in the index buffer it appeared.
        position: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl MeshError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            what,
            reason: reason.into(),
        }
    }
}
