//! Error types for the model icon renderer.

use thiserror::Error;

/// Result type alias using RenderError.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Main error type for model resolution and rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),

    /// Model identifier does not resolve to a readable document.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Model document exists but is not a valid model.
    #[error("Invalid model {id}: {source}")]
    InvalidModel {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Model inheritance chain too deep (circular reference protection).
    #[error("Model inheritance too deep (possible circular reference): {0}")]
    ParentRecursionExceeded(String),

    /// Texture variable indirection chain too long (or cyclic).
    #[error("Texture indirection too deep (possible circular reference): {0}")]
    TextureIndirectionExceeded(String),

    /// Texture reference could not be resolved or loaded.
    #[error("Unresolved texture reference: {0}")]
    TextureUnresolved(String),

    /// Model resolved to nothing that can be drawn.
    #[error("Model has no renderable elements: {0}")]
    EmptyModel(String),

    /// Model id does not map to a file inside the output directory.
    #[error("Invalid output path for {0}")]
    InvalidOutputPath(String),

    /// Rasterizing or encoding a frame failed.
    #[error("Capture failed: {0}")]
    CaptureFailure(String),
}
