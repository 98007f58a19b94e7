//! Scene Graph
//!
//! The decoded, renderer-independent view of a glTF scene:
//!
//! - [`Scene`]: node hierarchy plus the material pool
//! - [`Node`]: hierarchy entry carrying zero or more meshes
//! - [`Mesh`]: one renderable primitive with its geometry statistics,
//!   assigned material and `KHR_materials_variants` mappings

#[allow(clippy::module_inception)]
pub mod scene;
pub mod node;
pub mod mesh;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}

pub use mesh::{AttributeStats, GeometryStats, Mesh, VariantMapping};
pub use node::Node;
pub use scene::Scene;
