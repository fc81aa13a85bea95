//! Error types for scene assembly and render sessions.

use crate::material::MaterialId;
use thiserror::Error;

/// Errors that can occur while assembling a scene.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("Material handle {0:?} does not belong to this scene")]
    UnknownMaterial(MaterialId),

    #[error("No material named '{0}' in this scene")]
    MissingMaterial(String),
}

/// Errors that can occur while setting up or driving a render session.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Patch size must be at least one pixel")]
    InvalidPatchSize,

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Framebuffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for session operations.
pub type RenderResult<T> = Result<T, RenderError>;
