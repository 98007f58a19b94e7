//! Shared test fixtures: in-memory GLB assembly.
//!
//! Geometry payloads are zero-filled; only accessor layout matters to the
//! viewer core.

#![allow(dead_code)]

use serde_json::{Value, json};

const FLOAT: u32 = 5126;
const UNSIGNED_SHORT: u32 = 5123;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One primitive of a test mesh.
#[derive(Clone, Default)]
pub struct Prim {
    pub vertices: usize,
    pub indices: Option<usize>,
    pub normals: bool,
    pub uvs: bool,
    pub material: Option<usize>,
    /// `(material, variants)` pairs of `KHR_materials_variants`.
    pub mappings: Vec<(usize, Vec<usize>)>,
    /// DRACO-compressed: accessors without buffer views plus a
    /// `KHR_draco_mesh_compression` block pointing at the compressed stream.
    pub compressed: bool,
    /// Accessors without buffer views and no compression extension.
    pub detached: bool,
}

impl Prim {
    pub fn new(vertices: usize) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    pub fn indexed(mut self, indices: usize) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn normals(mut self) -> Self {
        self.normals = true;
        self
    }

    pub fn uvs(mut self) -> Self {
        self.uvs = true;
        self
    }

    pub fn material(mut self, material: usize) -> Self {
        self.material = Some(material);
        self
    }

    pub fn mapping(mut self, material: usize, variants: &[usize]) -> Self {
        self.mappings.push((material, variants.to_vec()));
        self
    }

    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }
}

#[derive(Default)]
pub struct GlbBuilder {
    generator: Option<String>,
    copyright: Option<String>,
    extensions_used: Vec<String>,
    extensions_required: Vec<String>,
    materials: Vec<String>,
    variants: Vec<String>,
    meshes: Vec<Value>,
    nodes: Vec<Value>,
    roots: Vec<usize>,
    accessors: Vec<Value>,
    views: Vec<Value>,
    bin: Vec<u8>,
}

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(&mut self, generator: &str) -> &mut Self {
        self.generator = Some(generator.to_string());
        self
    }

    pub fn copyright(&mut self, copyright: &str) -> &mut Self {
        self.copyright = Some(copyright.to_string());
        self
    }

    pub fn extension_used(&mut self, name: &str) -> &mut Self {
        self.extensions_used.push(name.to_string());
        self
    }

    pub fn extension_required(&mut self, name: &str) -> &mut Self {
        self.extension_used(name);
        self.extensions_required.push(name.to_string());
        self
    }

    /// Adds a material and returns its index.
    pub fn material(&mut self, name: &str) -> usize {
        self.materials.push(name.to_string());
        self.materials.len() - 1
    }

    pub fn variants(&mut self, names: &[&str]) -> &mut Self {
        self.variants = names.iter().map(ToString::to_string).collect();
        self.extension_used("KHR_materials_variants");
        self
    }

    /// Adds a mesh and returns its index.
    pub fn mesh(&mut self, name: Option<&str>, prims: Vec<Prim>) -> usize {
        let primitives: Vec<Value> = prims.iter().map(|p| self.primitive(p)).collect();
        let mut mesh = json!({ "primitives": primitives });
        if let Some(name) = name {
            mesh["name"] = json!(name);
        }
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Adds a node and returns its index.
    pub fn node(&mut self, name: Option<&str>, mesh: Option<usize>, children: &[usize]) -> usize {
        let mut node = json!({});
        if let Some(name) = name {
            node["name"] = json!(name);
        }
        if let Some(mesh) = mesh {
            node["mesh"] = json!(mesh);
        }
        if !children.is_empty() {
            node["children"] = json!(children);
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn root(&mut self, node: usize) -> &mut Self {
        self.roots.push(node);
        self
    }

    /// Overrides the `count` of an accessor after the fact.
    pub fn set_accessor_count(&mut self, accessor: usize, count: u64) -> &mut Self {
        self.accessors[accessor]["count"] = json!(count);
        self
    }

    fn primitive(&mut self, prim: &Prim) -> Value {
        let no_view = prim.compressed || prim.detached;
        let mut attributes = serde_json::Map::new();
        attributes.insert(
            "POSITION".into(),
            json!(self.accessor(prim.vertices, "VEC3", FLOAT, 12, no_view, true)),
        );
        if prim.normals {
            attributes.insert(
                "NORMAL".into(),
                json!(self.accessor(prim.vertices, "VEC3", FLOAT, 12, no_view, false)),
            );
        }
        if prim.uvs {
            attributes.insert(
                "TEXCOORD_0".into(),
                json!(self.accessor(prim.vertices, "VEC2", FLOAT, 8, no_view, false)),
            );
        }

        let mut extensions = serde_json::Map::new();
        if prim.compressed {
            let draco_ids: serde_json::Map<String, Value> = attributes
                .keys()
                .enumerate()
                .map(|(id, name)| (name.clone(), json!(id)))
                .collect();
            let stream = self.view(16);
            extensions.insert(
                "KHR_draco_mesh_compression".into(),
                json!({ "bufferView": stream, "attributes": draco_ids }),
            );
        }

        let mut primitive = json!({ "attributes": attributes });
        if let Some(count) = prim.indices {
            primitive["indices"] = json!(self.accessor(count, "SCALAR", UNSIGNED_SHORT, 2, no_view, false));
        }
        if let Some(material) = prim.material {
            primitive["material"] = json!(material);
        }
        if !prim.mappings.is_empty() {
            let mappings: Vec<Value> = prim
                .mappings
                .iter()
                .map(|(material, variants)| json!({ "material": material, "variants": variants }))
                .collect();
            extensions.insert("KHR_materials_variants".into(), json!({ "mappings": mappings }));
        }
        if !extensions.is_empty() {
            primitive["extensions"] = Value::Object(extensions);
        }
        primitive
    }

    /// Appends a zero-filled, 4-byte aligned buffer view and returns its index.
    fn view(&mut self, byte_length: usize) -> usize {
        let offset = self.bin.len();
        self.bin.resize(offset + byte_length, 0);
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        self.views.push(json!({ "buffer": 0, "byteOffset": offset, "byteLength": byte_length }));
        self.views.len() - 1
    }

    fn accessor(
        &mut self,
        count: usize,
        kind: &str,
        component_type: u32,
        item_size: usize,
        no_view: bool,
        bounds: bool,
    ) -> usize {
        let mut accessor = json!({
            "componentType": component_type,
            "count": count,
            "type": kind,
        });

        if !no_view {
            accessor["bufferView"] = json!(self.view(count * item_size));
        }
        if bounds {
            accessor["min"] = json!([0.0, 0.0, 0.0]);
            accessor["max"] = json!([1.0, 1.0, 1.0]);
        }

        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    fn document(&self) -> Value {
        let mut asset = json!({ "version": "2.0" });
        if let Some(generator) = &self.generator {
            asset["generator"] = json!(generator);
        }
        if let Some(copyright) = &self.copyright {
            asset["copyright"] = json!(copyright);
        }

        let materials: Vec<Value> = self.materials.iter().map(|name| json!({ "name": name })).collect();

        let mut root = json!({
            "asset": asset,
            "scene": 0,
            "scenes": [{ "nodes": self.roots }],
            "nodes": self.nodes,
            "meshes": self.meshes,
        });
        if !materials.is_empty() {
            root["materials"] = json!(materials);
        }
        if !self.accessors.is_empty() {
            root["accessors"] = json!(self.accessors);
        }
        if !self.views.is_empty() {
            root["bufferViews"] = json!(self.views);
        }
        if !self.bin.is_empty() {
            root["buffers"] = json!([{ "byteLength": self.bin.len() }]);
        }
        if !self.extensions_used.is_empty() {
            root["extensionsUsed"] = json!(self.extensions_used);
        }
        if !self.extensions_required.is_empty() {
            root["extensionsRequired"] = json!(self.extensions_required);
        }
        if !self.variants.is_empty() {
            let variants: Vec<Value> = self.variants.iter().map(|name| json!({ "name": name })).collect();
            root["extensions"] = json!({ "KHR_materials_variants": { "variants": variants } });
        }
        root
    }

    /// Packs the document and binary chunk into a GLB container.
    pub fn build(&self) -> Vec<u8> {
        let mut json = serde_json::to_vec(&self.document()).expect("serialize glTF JSON");
        while json.len() % 4 != 0 {
            json.push(b' ');
        }

        let mut total = 12 + 8 + json.len();
        if !self.bin.is_empty() {
            total += 8 + self.bin.len();
        }

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());

        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json);

        if !self.bin.is_empty() {
            out.extend_from_slice(&(self.bin.len() as u32).to_le_bytes());
            out.extend_from_slice(b"BIN\0");
            out.extend_from_slice(&self.bin);
        }
        out
    }
}

// ============================================================================
// Canned assets
// ============================================================================

pub const BASE: usize = 0;
pub const RED: usize = 1;
pub const BLUE: usize = 2;

pub const MIDNIGHT: usize = 0;
pub const BEACH: usize = 1;

/// A small chair-like asset with two material variants.
///
/// ```text
/// Root
/// ├── BodyNode   mesh "Body"  (1 primitive, mapped for Midnight→Red, Beach→Blue)
/// │   └── LegsNode mesh "Legs" (2 primitives: Legs_0 mapped Midnight→Red; Legs_1 no material)
/// └── (unnamed)  unnamed mesh (1 primitive, unmapped)
/// ```
///
/// Traversal order of meshes: Body, Legs_0, Legs_1, Mesh_3.
pub fn variant_chair() -> Vec<u8> {
    let mut b = GlbBuilder::new();
    b.generator("glb-viewer tests").copyright("CC0");
    b.material("Base");
    b.material("Red");
    b.material("Blue");
    b.variants(&["Midnight", "Beach"]);

    let body = b.mesh(
        Some("Body"),
        vec![
            Prim::new(24)
                .indexed(36)
                .normals()
                .uvs()
                .material(BASE)
                .mapping(RED, &[MIDNIGHT])
                .mapping(BLUE, &[BEACH]),
        ],
    );
    let legs = b.mesh(
        Some("Legs"),
        vec![Prim::new(8).indexed(12).material(BASE).mapping(RED, &[MIDNIGHT]), Prim::new(4)],
    );
    let unnamed = b.mesh(None, vec![Prim::new(3).normals().material(BASE)]);

    let legs_node = b.node(Some("LegsNode"), Some(legs), &[]);
    let body_node = b.node(Some("BodyNode"), Some(body), &[legs_node]);
    let unnamed_node = b.node(None, Some(unnamed), &[]);
    let root = b.node(Some("Root"), None, &[body_node, unnamed_node]);
    b.root(root);
    b.build()
}

/// A single indexed triangle without variants.
pub fn plain_triangle() -> Vec<u8> {
    let mut b = GlbBuilder::new();
    let mesh = b.mesh(Some("Triangle"), vec![Prim::new(3).indexed(3)]);
    let node = b.node(Some("TriangleNode"), Some(mesh), &[]);
    b.root(node);
    b.build()
}
