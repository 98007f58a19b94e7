use slotmap::SlotMap;

use crate::assets::{Material, MaterialHandle, MaterialPool};
use crate::scene::NodeHandle;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;

/// Decoded scene graph.
///
/// Scene is pure data: hierarchy, per-node meshes and the material pool the
/// meshes point into. It never touches the GPU.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
    pub materials: MaterialPool,
    default_material: Option<MaterialHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            materials: MaterialPool::new(),
            default_material: None,
        }
    }

    /// Adds a node as a root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`.
    pub fn add_child(&mut self, parent: NodeHandle, mut node: Node) -> NodeHandle {
        node.parent = Some(parent);
        let handle = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Finds the first node with the given name, in traversal order.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.traversal_order()
            .into_iter()
            .find(|&h| self.nodes[h].name.as_deref() == Some(name))
    }

    /// The glTF default material, created on first use.
    pub fn default_material(&mut self) -> MaterialHandle {
        *self
            .default_material
            .get_or_insert_with(|| self.materials.add(Material::default()))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.values().map(|n| n.meshes.len()).sum()
    }

    /// Node handles in depth-first pre-order: roots in order, each node
    /// before its children, children in order.
    #[must_use]
    pub fn traversal_order(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// Visits every node once in traversal order.
    pub fn traverse(&self, mut visit: impl FnMut(NodeHandle, &Node)) {
        for handle in self.traversal_order() {
            visit(handle, &self.nodes[handle]);
        }
    }

    /// Visits every mesh once in traversal order.
    pub fn for_each_mesh(&self, mut visit: impl FnMut(&Node, &Mesh)) {
        self.traverse(|_, node| {
            for mesh in &node.meshes {
                visit(node, mesh);
            }
        });
    }

    /// Mutable variant of [`for_each_mesh`](Self::for_each_mesh). The
    /// material pool is handed along read-only.
    pub fn for_each_mesh_mut(&mut self, mut visit: impl FnMut(&mut Mesh, &MaterialPool)) {
        let order = self.traversal_order();
        let Self { nodes, materials, .. } = self;
        for handle in order {
            for mesh in &mut nodes[handle].meshes {
                visit(mesh, materials);
            }
        }
    }

    /// Material currently assigned to each mesh, in traversal order.
    #[must_use]
    pub fn assigned_materials(&self) -> Vec<MaterialHandle> {
        let mut out = Vec::new();
        self.for_each_mesh(|_, mesh| out.push(mesh.material));
        out
    }
}
