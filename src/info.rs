//! GLB Metadata Snapshot
//!
//! [`GlbInfo::extract`] walks a decoded scene once and aggregates what the
//! side panel shows: asset header, extensions, one summary per renderable
//! mesh and the running totals.
//!
//! Sizes are decoded sizes (`count * element size` per accessor), so a
//! DRACO-compressed primitive reports the size its geometry has once
//! decompressed, not its share of the compressed stream. Accessor counts are
//! taken from the file as-is, so sizes and totals saturate instead of
//! overflowing.

use serde::Serialize;

use crate::assets::DecodedModel;
use crate::errors::Result;
use crate::settings::ViewerSettings;

/// Per-mesh row of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub name: String,
    pub vertex_count: usize,
    pub index_count: usize,
    pub attributes: Vec<String>,
    pub byte_length: u64,
    pub size_kb: f64,
    /// Geometry is stored in a compressed stream (e.g. DRACO).
    pub compressed: bool,
}

/// Aggregate over every [`MeshSummary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub vertices: usize,
    pub indices: usize,
    pub byte_length: u64,
    pub size_kb: f64,
}

/// Number of entries in each top-level glTF array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    pub scenes: usize,
    pub nodes: usize,
    pub meshes: usize,
    pub materials: usize,
    pub textures: usize,
    pub animations: usize,
}

/// Read-only metadata snapshot of a loaded GLB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlbInfo {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
    /// `extensionsUsed`, deduplicated, in document order.
    pub extensions: Vec<String>,
    pub extensions_required: Vec<String>,
    pub meshes: Vec<MeshSummary>,
    pub totals: Totals,
    pub counts: DocumentCounts,
    pub variants: Vec<String>,
}

impl GlbInfo {
    /// Builds the snapshot in one traversal of `model.scene`.
    #[must_use]
    pub fn extract(model: &DecodedModel, settings: &ViewerSettings) -> Self {
        let document = &model.document;
        let asset = &document.as_json().asset;

        let mut meshes = Vec::with_capacity(model.scene.mesh_count());
        let mut totals = Totals::default();

        model.scene.for_each_mesh(|_, mesh| {
            let geometry = &mesh.geometry;
            let byte_length = geometry.byte_length();
            let name = mesh
                .name
                .clone()
                .unwrap_or_else(|| format!("{}{}", settings.placeholder_prefix, meshes.len()));

            let summary = MeshSummary {
                name,
                vertex_count: geometry.vertex_count(),
                index_count: geometry.index_count(),
                attributes: geometry.attribute_names(),
                byte_length,
                size_kb: settings.to_kilobytes(byte_length),
                compressed: geometry.is_compressed(),
            };

            totals.vertices = totals.vertices.saturating_add(summary.vertex_count);
            totals.indices = totals.indices.saturating_add(summary.index_count);
            totals.byte_length = totals.byte_length.saturating_add(summary.byte_length);
            meshes.push(summary);
        });
        totals.size_kb = settings.to_kilobytes(totals.byte_length);

        Self {
            version: asset.version.clone(),
            generator: asset.generator.clone(),
            copyright: asset.copyright.clone(),
            extensions: dedup_in_order(document.extensions_used()),
            extensions_required: dedup_in_order(model.extensions_required.iter().map(String::as_str)),
            meshes,
            totals,
            counts: DocumentCounts {
                scenes: document.scenes().count(),
                nodes: document.nodes().count(),
                meshes: document.meshes().count(),
                materials: document.materials().count(),
                textures: document.textures().count(),
                animations: document.animations().count(),
            },
            variants: model.variant_names(),
        }
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn uses_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn dedup_in_order<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}
