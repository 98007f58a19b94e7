//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers the failure modes of the
//! viewer core:
//! - File intake and I/O errors
//! - GLB container and glTF document errors
//! - Material resolution errors raised while switching variants
//!
//! Most of these never reach the user: intake ignores bad files and the
//! variant switcher logs and skips meshes whose material cannot be resolved.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`.
//!
//! ```rust,ignore
//! use glb_viewer::errors::Result;
//! use glb_viewer::assets::GlbLoader;
//!
//! fn decode(bytes: &[u8]) -> Result<()> {
//!     let model = GlbLoader::decode(bytes)?;
//!     log::info!("{} nodes", model.scene.node_count());
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Intake & I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The selected file is not a binary glTF container.
    #[error("Not a GLB file: {0}")]
    NotGlb(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// glTF parsing or validation error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Material & Variant Errors
    // ========================================================================
    /// A variant mapping referenced a material the document does not have.
    #[error("Material index out of bounds: {index} (document has {len})")]
    MaterialIndexOutOfBounds {
        /// The invalid glTF material index
        index: usize,
        /// Number of materials in the document
        len: usize,
    },

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// The background decode worker panicked before producing a result.
    #[error("Decode worker panicked")]
    DecodeWorkerGone,
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        ViewerError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
