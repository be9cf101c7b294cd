use thiserror::Error;

/// Errors surfaced to whoever invoked a sketch operation
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Cannot export an empty surface")]
    EmptySurface,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid line width: {0}")]
    InvalidLineWidth(f32),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sketch operations
pub type SketchResult<T> = Result<T, SketchError>;
