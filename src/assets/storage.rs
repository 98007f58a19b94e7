use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::assets::{Material, MaterialHandle};

/// Materials of one decoded model.
///
/// Materials decoded from the document are registered under their glTF
/// index so each is decoded at most once; the glTF default material has no
/// index and is added anonymously.
#[derive(Debug, Default)]
pub struct MaterialPool {
    materials: SlotMap<MaterialHandle, Material>,
    by_index: FxHashMap<usize, MaterialHandle>,
}

impl MaterialPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material with no document counterpart.
    pub fn add(&mut self, material: Material) -> MaterialHandle {
        self.materials.insert(material)
    }

    /// Registers `material` under glTF `index`. An index that is already
    /// registered keeps its material and `material` is dropped.
    pub fn add_indexed(&mut self, index: usize, material: Material) -> MaterialHandle {
        self.get_or_insert_with(index, || material)
    }

    /// Returns the handle for `index`, decoding it with `decode` on first use.
    pub fn get_or_insert_with(&mut self, index: usize, decode: impl FnOnce() -> Material) -> MaterialHandle {
        if let Some(&handle) = self.by_index.get(&index) {
            return handle;
        }
        let handle = self.materials.insert(decode());
        self.by_index.insert(index, handle);
        handle
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Material> {
        self.handle_for_index(index).and_then(|h| self.materials.get(h))
    }

    #[inline]
    #[must_use]
    pub fn handle_for_index(&self, index: usize) -> Option<MaterialHandle> {
        self.by_index.get(&index).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
