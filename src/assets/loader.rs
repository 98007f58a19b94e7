use std::panic;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::assets::Material;
use crate::errors::{Result, ViewerError};
use crate::scene::{AttributeStats, GeometryStats, Mesh, Node, NodeHandle, Scene, VariantMapping};
use crate::session::{LoadRequest, LoadTicket};

/// Extensions whose semantics the viewer core implements itself.
const HANDLED_EXTENSIONS: &[&str] = &["KHR_materials_variants"];

/// Extensions the viewer core only reports; the renderer deals with them.
const PASSTHROUGH_EXTENSIONS: &[&str] = &[DRACO_EXTENSION, "KHR_mesh_quantization"];

const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// A decoded GLB: the parsed document plus the scene graph built from it.
pub struct DecodedModel {
    pub document: Arc<gltf::Document>,
    /// `extensionsRequired` as declared by the file.
    pub extensions_required: Vec<String>,
    pub scene: Scene,
}

impl DecodedModel {
    /// Variant names declared by `KHR_materials_variants`, in document order.
    #[must_use]
    pub fn variant_names(&self) -> Vec<String> {
        self.document
            .variants()
            .map(|variants| variants.map(|v| v.name().to_string()).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// GlbLoader
// ============================================================================

pub struct GlbLoader<'a> {
    document: &'a gltf::Document,
    scene: Scene,
    visited: FxHashSet<usize>,
}

impl<'a> GlbLoader<'a> {
    /// Entry point: GLB bytes -> [`DecodedModel`].
    pub fn decode(bytes: &[u8]) -> Result<DecodedModel> {
        if !bytes.starts_with(b"glTF") {
            return Err(ViewerError::NotGlb("missing GLB magic".to_string()));
        }

        let glb = gltf::Glb::from_slice(bytes)?;
        let raw: serde_json::Value = serde_json::from_slice(&glb.json)?;
        let draco_accessors = Self::draco_accessors(&raw);
        let mut root: gltf::json::Root = serde_json::from_value(raw)?;

        // Required extensions are reported, not enforced: decoding them is the renderer's job.
        let extensions_required = std::mem::take(&mut root.extensions_required);
        Self::report_extensions(&extensions_required);

        Self::validate(&root, &draco_accessors)?;
        let document = gltf::Document::from_json_without_validation(root);

        let scene = {
            let mut loader = GlbLoader {
                document: &document,
                scene: Scene::new(),
                visited: FxHashSet::default(),
            };
            loader.build_scene();
            loader.scene
        };

        log::info!(
            "Decoded GLB: {} nodes, {} meshes, {} materials",
            scene.node_count(),
            scene.mesh_count(),
            document.materials().count()
        );

        Ok(DecodedModel {
            document: Arc::new(document),
            extensions_required,
            scene,
        })
    }

    /// Accessors referenced by `KHR_draco_mesh_compression` primitives.
    /// Their data lives in the compressed stream, so they carry no buffer view.
    fn draco_accessors(raw: &serde_json::Value) -> FxHashSet<usize> {
        let primitives = raw["meshes"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|mesh| mesh["primitives"].as_array())
            .flatten()
            .filter(|primitive| !primitive["extensions"][DRACO_EXTENSION].is_null());

        let mut accessors = FxHashSet::default();
        for primitive in primitives {
            if let Some(attributes) = primitive["attributes"].as_object() {
                accessors.extend(attributes.values().filter_map(serde_json::Value::as_u64));
            }
            accessors.extend(primitive["indices"].as_u64());
        }
        accessors.into_iter().map(|index| index as usize).collect()
    }

    /// glTF validation, minus the missing buffer views of DRACO accessors.
    fn validate(root: &gltf::json::Root, draco_accessors: &FxHashSet<usize>) -> Result<()> {
        use gltf::json::validation::{Error, Validate};

        let exempt: FxHashSet<String> = draco_accessors
            .iter()
            .map(|index| format!("accessors[{index}].bufferView"))
            .collect();

        let mut errors = Vec::new();
        root.validate(root, gltf::json::Path::new, &mut |path, error| {
            let path = path();
            if !(matches!(error, Error::Missing) && exempt.contains(path.as_str())) {
                errors.push((path, error));
            }
        });

        if errors.is_empty() {
            Ok(())
        } else {
            Err(gltf::Error::Validation(errors).into())
        }
    }

    fn report_extensions(required: &[String]) {
        let unknown: Vec<_> = required
            .iter()
            .filter(|ext| {
                !HANDLED_EXTENSIONS.contains(&ext.as_str()) && !PASSTHROUGH_EXTENSIONS.contains(&ext.as_str())
            })
            .collect();

        if !unknown.is_empty() {
            log::warn!("GLB requires extensions the viewer does not know: {unknown:?}");
        }

        if required.iter().any(|ext| ext == DRACO_EXTENSION) {
            log::debug!("GLB uses DRACO compression; sizes are reported from accessor metadata");
        }
    }

    fn build_scene(&mut self) {
        let Some(gltf_scene) = self.document.default_scene().or_else(|| self.document.scenes().next()) else {
            return;
        };

        for node in gltf_scene.nodes() {
            self.instantiate(&node, None);
        }
    }

    fn instantiate(&mut self, gltf_node: &gltf::Node<'_>, parent: Option<NodeHandle>) {
        // A malformed hierarchy may reference a node twice; instantiate it once.
        if !self.visited.insert(gltf_node.index()) {
            log::debug!("Skipping repeated reference to node {}", gltf_node.index());
            return;
        }

        let mut node = Node::new();
        node.name = gltf_node.name().map(str::to_string);
        node.source_index = Some(gltf_node.index());
        if let Some(gltf_mesh) = gltf_node.mesh() {
            node.meshes = self.load_meshes(&gltf_mesh);
        }

        let handle = match parent {
            Some(parent) => self.scene.add_child(parent, node),
            None => self.scene.add_node(node),
        };

        for child in gltf_node.children() {
            self.instantiate(&child, Some(handle));
        }
    }

    fn load_meshes(&mut self, gltf_mesh: &gltf::Mesh<'_>) -> Vec<Mesh> {
        let primitive_count = gltf_mesh.primitives().count();

        gltf_mesh
            .primitives()
            .enumerate()
            .map(|(i, primitive)| {
                let name = gltf_mesh.name().map(|name| {
                    if primitive_count > 1 {
                        format!("{name}_{i}")
                    } else {
                        name.to_string()
                    }
                });
                let geometry = Self::geometry_stats(&primitive);
                let material = self.primary_material(&primitive.material());

                Mesh::new(name, geometry, material).with_mappings(Self::variant_mappings(&primitive))
            })
            .collect()
    }

    fn geometry_stats(primitive: &gltf::Primitive<'_>) -> GeometryStats {
        GeometryStats {
            attributes: primitive
                .attributes()
                .map(|(semantic, accessor)| AttributeStats::from_accessor(semantic.to_string(), &accessor))
                .collect(),
            index: primitive
                .indices()
                .map(|accessor| AttributeStats::from_accessor("indices", &accessor)),
        }
    }

    fn primary_material(&mut self, material: &gltf::Material<'_>) -> crate::assets::MaterialHandle {
        match material.index() {
            Some(index) => self.scene.materials.get_or_insert_with(index, || Material::from(material)),
            None => self.scene.default_material(),
        }
    }

    fn variant_mappings(primitive: &gltf::Primitive<'_>) -> Vec<VariantMapping> {
        primitive
            .mappings()
            .filter_map(|mapping| {
                let material = mapping.material().index()?;
                Some(VariantMapping {
                    material,
                    variants: mapping.variants().iter().map(|&v| v as usize).collect(),
                })
            })
            .collect()
    }
}

// ============================================================================
// Background decoding
// ============================================================================

/// Outcome of a background decode, tagged with the request's ticket.
pub struct DecodeResult {
    pub ticket: LoadTicket,
    pub result: Result<DecodedModel>,
}

/// Decodes load requests on worker threads.
///
/// Results are collected on a channel the UI thread drains once per frame.
/// Requests are never cancelled; the session drops results whose ticket is
/// no longer live.
pub struct BackgroundDecoder {
    tx: flume::Sender<DecodeResult>,
    rx: flume::Receiver<DecodeResult>,
}

impl Default for BackgroundDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundDecoder {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    pub fn spawn(&self, request: LoadRequest) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            // A panicking decode still answers its ticket.
            let result = panic::catch_unwind(|| GlbLoader::decode(&request.bytes))
                .unwrap_or_else(|_| Err(ViewerError::DecodeWorkerGone));
            if let Err(e) = &result {
                log::warn!("Failed to decode {}: {e}", request.url);
            }
            let _ = tx.send(DecodeResult {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Non-blocking poll for one finished decode.
    #[must_use]
    pub fn try_recv(&self) -> Option<DecodeResult> {
        self.rx.try_recv().ok()
    }

    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DecodeResult> {
        self.rx.recv_timeout(timeout).ok()
    }
}
