use crate::scene::NodeHandle;
use crate::scene::mesh::Mesh;

/// A scene graph node.
///
/// Nodes form a tree through `children`. A node carries zero or more
/// renderable meshes; a glTF mesh with several primitives yields one
/// [`Mesh`] per primitive.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: Option<String>,
    /// Index of the glTF node this was instantiated from.
    pub source_index: Option<usize>,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub meshes: Vec<Mesh>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
