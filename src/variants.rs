//! Material Variants (`KHR_materials_variants`)
//!
//! A variant is a named alternative material assignment. Each primitive may
//! carry mappings `{ material, variants: [..] }`; selecting a variant swaps
//! every mapped mesh to its material and returns every unmapped mesh to the
//! material it had before the first switch.
//!
//! Materials referenced only by variants are not decoded up front. They are
//! resolved through a [`MaterialResolver`] the first time a variant needs
//! them and cached in the scene's material storage by glTF index.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;

use crate::assets::Material;
use crate::errors::{Result, ViewerError};
use crate::scene::Scene;

/// Resolves glTF material indices into [`Material`]s.
pub trait MaterialResolver {
    fn resolve(&self, index: usize) -> impl Future<Output = Result<Material>>;
}

/// Resolves materials from the model's own glTF document.
pub struct DocumentMaterials {
    document: Arc<gltf::Document>,
}

impl DocumentMaterials {
    #[must_use]
    pub fn new(document: Arc<gltf::Document>) -> Self {
        Self { document }
    }
}

impl MaterialResolver for DocumentMaterials {
    async fn resolve(&self, index: usize) -> Result<Material> {
        let material = self
            .document
            .materials()
            .nth(index)
            .ok_or_else(|| ViewerError::MaterialIndexOutOfBounds {
                index,
                len: self.document.materials().count(),
            })?;
        Ok(Material::from(&material))
    }
}

// ============================================================================
// VariantSet
// ============================================================================

/// Variant names of a model and the active one.
///
/// The active variant, when set, is always one of `names`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    names: Vec<String>,
    current: Option<String>,
}

impl VariantSet {
    /// Returns `None` for an empty list: the model has no variants.
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Option<Self> {
        if names.is_empty() {
            return None;
        }
        Some(Self { names, current: None })
    }

    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Restores every mesh touched by a switch and clears the active variant.
    pub fn reset(&mut self, scene: &mut Scene) {
        scene.for_each_mesh_mut(|mesh, _| {
            if let Some(original) = mesh.original_material() {
                mesh.material = original;
            }
        });
        self.current = None;
    }
}

// ============================================================================
// Switching
// ============================================================================

/// Per-mesh counts of a variant switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchReport {
    /// Meshes assigned the variant's material.
    pub switched: usize,
    /// Meshes without a mapping that went back to their original material.
    pub restored: usize,
    /// Meshes left unchanged because their material failed to resolve.
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Unknown variant or no variants at all; nothing changed.
    Ignored,
    Applied(SwitchReport),
}

/// Switches `scene` to the variant called `name`.
///
/// Unknown names are a no-op. Distinct materials are resolved concurrently;
/// a failed resolution is logged and only its meshes keep their material.
pub async fn switch_variant<R: MaterialResolver>(
    scene: &mut Scene,
    variants: &mut VariantSet,
    name: &str,
    resolver: &R,
) -> SwitchOutcome {
    let Some(variant) = variants.index_of(name) else {
        log::debug!("Ignoring unknown material variant: {name}");
        return SwitchOutcome::Ignored;
    };

    // 1. Material indices this variant needs that are not decoded yet
    let mut pending: Vec<usize> = Vec::new();
    scene.for_each_mesh(|_, mesh| {
        if let Some(index) = mesh.material_for_variant(variant)
            && scene.materials.handle_for_index(index).is_none()
            && !pending.contains(&index)
        {
            pending.push(index);
        }
    });

    // 2. Resolve them concurrently
    let resolved = join_all(
        pending
            .iter()
            .map(|&index| async move { (index, resolver.resolve(index).await) }),
    )
    .await;

    for (index, result) in resolved {
        match result {
            Ok(material) => {
                scene.materials.add_indexed(index, material);
            }
            Err(e) => log::error!("Failed to resolve material {index} for variant '{name}': {e}"),
        }
    }

    // 3. Assign
    let mut report = SwitchReport::default();
    scene.for_each_mesh_mut(|mesh, materials| {
        let original = mesh.remember_original();
        match mesh.material_for_variant(variant) {
            Some(index) => match materials.handle_for_index(index) {
                Some(handle) => {
                    mesh.material = handle;
                    report.switched += 1;
                }
                None => report.failed += 1,
            },
            None => {
                if mesh.material != original {
                    mesh.material = original;
                    report.restored += 1;
                }
            }
        }
    });

    variants.current = Some(variants.names[variant].clone());
    log::info!(
        "Switched to variant '{name}': {} switched, {} restored, {} failed",
        report.switched,
        report.restored,
        report.failed
    );

    SwitchOutcome::Applied(report)
}
