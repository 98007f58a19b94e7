//! Viewer Settings
//!
//! Runtime configuration for file intake, metadata extraction and the side
//! panel. Every field has a default, so a settings file only needs to name
//! what it overrides.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glb_viewer::settings::ViewerSettings;
//!
//! // Defaults: accept `.glb`, name unnamed meshes `Mesh_<n>`, KB = 1024 bytes
//! let settings = ViewerSettings::default();
//!
//! // Partial JSON override
//! let settings = ViewerSettings::from_json_str(r#"{ "placeholder_prefix": "Primitive " }"#)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Configuration shared by the session, the metadata extractor and the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// File extensions accepted by intake, compared case-insensitively and
    /// without the leading dot.
    pub accepted_extensions: Vec<String>,

    /// Prefix of the generated name for meshes without an explicit name.
    /// The mesh's traversal position is appended.
    pub placeholder_prefix: String,

    /// Divisor used to turn byte sizes into the kilobytes shown in the panel.
    pub bytes_per_kilobyte: u32,

    /// Whether the side panel shows the variant buttons.
    pub show_variants: bool,

    /// Scheme and authority of generated transient URLs.
    pub blob_url_prefix: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["glb".to_string()],
            placeholder_prefix: "Mesh_".to_string(),
            bytes_per_kilobyte: 1024,
            show_variants: true,
            blob_url_prefix: "blob:glb-viewer/".to_string(),
        }
    }
}

impl ViewerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Returns `true` if `file_name` carries one of the accepted extensions.
    #[must_use]
    pub fn accepts(&self, file_name: &str) -> bool {
        let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }

    /// Converts a byte count into kilobytes.
    #[inline]
    #[must_use]
    pub fn to_kilobytes(&self, bytes: u64) -> f64 {
        bytes as f64 / f64::from(self.bytes_per_kilobyte.max(1))
    }
}
