use saturn_mesh::MeshError;

/// Errors raised while assembling a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to build mesh for {body}: {source}")]
    Mesh {
        body: String,
        #[source]
        source: MeshError,
    },

    #[error("invalid {what}: {reason}")]
    InvalidParameter { what: &'static str, reason: String },
}
