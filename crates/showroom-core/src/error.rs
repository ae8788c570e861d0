use thiserror::Error;

/// Startup configuration problems. None of these can occur per frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no marker element matches '{selector}' for point {index}")]
    MissingMarker { index: usize, selector: String },
    #[error("at least one point of interest must be configured")]
    NoPoints,
}

/// Problems reading a glTF document or its binary buffers.
#[derive(Debug, Error)]
pub enum GltfError {
    #[error("invalid glTF document: {0}")]
    Document(#[from] gltf::Error),
    #[error("unsupported glTF feature: {0}")]
    Unsupported(String),
    #[error("accessor {index}: {reason}")]
    Accessor { index: usize, reason: String },
    #[error("buffer {index} is missing or too short")]
    Buffer { index: usize },
}
