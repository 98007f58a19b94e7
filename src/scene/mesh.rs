use smallvec::SmallVec;

use crate::assets::MaterialHandle;

/// Statistics of one vertex attribute or of the index buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeStats {
    /// glTF semantic, e.g. `POSITION` or `TEXCOORD_0`. `indices` for the index buffer.
    pub name: String,
    /// Number of elements.
    pub count: usize,
    /// Bytes per element.
    pub item_size: usize,
    /// The accessor has no buffer view; its data lives in a compressed stream.
    pub compressed: bool,
}

impl AttributeStats {
    /// Decoded byte length: `count * item_size`, saturating. `count` comes
    /// straight from the file and is not checked against the buffer.
    #[inline]
    #[must_use]
    pub fn byte_length(&self) -> u64 {
        (self.count as u64).saturating_mul(self.item_size as u64)
    }

    pub(crate) fn from_accessor(name: impl Into<String>, accessor: &gltf::Accessor<'_>) -> Self {
        Self {
            name: name.into(),
            count: accessor.count(),
            item_size: accessor.size(),
            compressed: accessor.view().is_none(),
        }
    }
}

/// Geometry layout of a renderable mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryStats {
    /// Vertex attributes in document order.
    pub attributes: Vec<AttributeStats>,
    pub index: Option<AttributeStats>,
}

impl GeometryStats {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeStats> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Number of vertices, taken from `POSITION`. Zero if absent.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.attribute("POSITION").map_or(0, |a| a.count)
    }

    /// Number of indices. Zero for non-indexed geometry.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.index.as_ref().map_or(0, |i| i.count)
    }

    /// Total decoded byte length of all attributes plus the index buffer.
    #[must_use]
    pub fn byte_length(&self) -> u64 {
        self.attributes
            .iter()
            .chain(self.index.iter())
            .fold(0u64, |total, a| total.saturating_add(a.byte_length()))
    }

    #[must_use]
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }

    /// `true` if any accessor is stored in a compressed stream.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.attributes.iter().chain(self.index.iter()).any(|a| a.compressed)
    }
}

/// One `KHR_materials_variants` mapping of a primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMapping {
    /// glTF material index used by the listed variants.
    pub material: usize,
    /// Indices into the document's variant list.
    pub variants: SmallVec<[usize; 4]>,
}

/// A renderable mesh: one glTF primitive attached to a node.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Explicit name, if the document provides one.
    pub name: Option<String>,
    pub geometry: GeometryStats,
    /// Currently assigned material.
    pub material: MaterialHandle,
    pub variant_mappings: Vec<VariantMapping>,
    /// Material assigned before the first variant switch touched this mesh.
    pub(crate) original_material: Option<MaterialHandle>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: Option<String>, geometry: GeometryStats, material: MaterialHandle) -> Self {
        Self {
            name,
            geometry,
            material,
            variant_mappings: Vec::new(),
            original_material: None,
        }
    }

    #[must_use]
    pub fn with_mappings(mut self, mappings: Vec<VariantMapping>) -> Self {
        self.variant_mappings = mappings;
        self
    }

    /// glTF material index mapped to `variant`, if any.
    #[must_use]
    pub fn material_for_variant(&self, variant: usize) -> Option<usize> {
        self.variant_mappings
            .iter()
            .find(|m| m.variants.contains(&variant))
            .map(|m| m.material)
    }

    /// The cached original material, if a switch has touched this mesh.
    #[inline]
    #[must_use]
    pub fn original_material(&self) -> Option<MaterialHandle> {
        self.original_material
    }

    /// Caches the current material as the original one. Idempotent.
    pub(crate) fn remember_original(&mut self) -> MaterialHandle {
        *self.original_material.get_or_insert(self.material)
    }
}
