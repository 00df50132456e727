//! Error types for loading scenes and writing images.

use std::io;

use thiserror::Error;

/// Errors that can occur outside the render loop.
#[derive(Error, Debug)]
pub enum TracerError {
    /// Reading a scene or writing an image failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The scene description is not valid JSON for the expected layout.
    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    /// The scene parsed, but describes something that can't be rendered.
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for scene loading and image output.
pub type Result<T> = std::result::Result<T, TracerError>;
