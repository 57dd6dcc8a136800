//! Error handling for Collage
//!
//! Every failure is reported at the operation boundary; nothing in the
//! library is fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

use crate::filters::filter_names;

/// Result type alias for Collage operations
pub type Result<T> = std::result::Result<T, CollageError>;

/// Main error type for Collage operations
#[derive(Error, Debug)]
pub enum CollageError {
    // Project Errors
    #[error("Invalid project dimensions: {reason}")]
    InvalidDimensions { reason: String },

    #[error("No project is open")]
    NoActiveProject,

    // Layer Errors
    #[error("Layer already exists: {name}")]
    DuplicateLayer { name: String },

    #[error("Layer does not exist: {name}")]
    UnknownLayer { name: String },

    #[error("Layer index {index} out of range (project has {len} layers)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Pixel ({row}, {col}) out of range for {height}x{width} canvas")]
    PixelOutOfRange {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Image offset ({x}, {y}) outside {width}x{height} project")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Layers '{a}' and '{b}' are already in the same position")]
    NoOpSwap { a: String, b: String },

    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    // File Errors
    #[error("Malformed file: {reason}")]
    MalformedFile { reason: String },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CollageError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CollageError::MalformedFile {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CollageError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            CollageError::NoActiveProject => "NO_ACTIVE_PROJECT",
            CollageError::DuplicateLayer { .. } => "DUPLICATE_LAYER",
            CollageError::UnknownLayer { .. } => "UNKNOWN_LAYER",
            CollageError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            CollageError::PixelOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            CollageError::OutOfRange { .. } => "OUT_OF_RANGE",
            CollageError::NoOpSwap { .. } => "NO_OP_SWAP",
            CollageError::UnknownFilter { .. } => "UNKNOWN_FILTER",
            CollageError::MalformedFile { .. } => "MALFORMED_FILE",
            CollageError::FileNotFound { .. } => "FILE_NOT_FOUND",
            CollageError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            CollageError::Codec(_) => "CODEC_ERROR",
            CollageError::Io(_) => "IO_ERROR",
            CollageError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a user-facing recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<String> {
        let hint = match self {
            CollageError::NoActiveProject => {
                "Create one with 'new-project' or open one with 'load-project'."
            }
            CollageError::UnknownLayer { .. } => "Run 'list-layers' to see existing layers.",
            CollageError::DuplicateLayer { .. } => "Pick a different layer name.",
            CollageError::UnknownFilter { .. } => {
                return Some(format!("Filters: {}", filter_names()))
            }
            CollageError::FileNotFound { .. } => "Check the file path and try again.",
            CollageError::UnsupportedFormat { .. } => {
                "Projects are saved as .collage; plain images as .ppm."
            }
            _ => return None,
        };
        Some(hint.to_string())
    }
}
