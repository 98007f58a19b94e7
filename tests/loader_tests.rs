//! GLB Loader Tests
//!
//! Tests for:
//! - GlbLoader: container detection, scene graph construction, primitive splitting
//! - Material storage: eager primary materials, default material, index dedup
//! - DRACO primitives: accessors without buffer views
//! - Background decoding

mod common;

use std::time::Duration;

use common::{BASE, GlbBuilder, Prim, variant_chair};
use glb_viewer::assets::{BackgroundDecoder, GlbLoader, SelectedFile};
use glb_viewer::{Session, ViewerError};

// ============================================================================
// Container Detection
// ============================================================================

#[test]
fn decode_rejects_non_glb_bytes() {
    let err = GlbLoader::decode(br#"{"asset":{"version":"2.0"}}"#).err().unwrap();
    assert!(matches!(err, ViewerError::NotGlb(_)));
}

#[test]
fn decode_reports_truncated_glb() {
    let mut bytes = variant_chair();
    bytes.truncate(40);
    assert!(matches!(GlbLoader::decode(&bytes), Err(ViewerError::GltfError(_))));
}

// ============================================================================
// Scene Graph
// ============================================================================

#[test]
fn builds_hierarchy_from_default_scene() {
    common::init_logger();
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let scene = &model.scene;

    assert_eq!(scene.node_count(), 4);
    assert_eq!(scene.root_nodes.len(), 1);

    let root = scene.get_node(scene.root_nodes[0]).unwrap();
    assert_eq!(root.name.as_deref(), Some("Root"));
    assert_eq!(root.children().len(), 2);

    let legs = scene.find_node_by_name("LegsNode").unwrap();
    let body = scene.find_node_by_name("BodyNode").unwrap();
    assert_eq!(scene.get_node(legs).unwrap().parent(), Some(body));
}

#[test]
fn traversal_is_depth_first_preorder() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let scene = &model.scene;

    let names: Vec<Option<String>> = scene
        .traversal_order()
        .into_iter()
        .map(|h| scene.get_node(h).unwrap().name.clone())
        .collect();

    assert_eq!(
        names,
        vec![
            Some("Root".to_string()),
            Some("BodyNode".to_string()),
            Some("LegsNode".to_string()),
            None,
        ]
    );
}

#[test]
fn multi_primitive_mesh_yields_suffixed_meshes() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let legs = model.scene.find_node_by_name("LegsNode").unwrap();
    let node = model.scene.get_node(legs).unwrap();

    let names: Vec<_> = node.meshes.iter().map(|m| m.name.clone()).collect();
    assert_eq!(names, vec![Some("Legs_0".to_string()), Some("Legs_1".to_string())]);
}

#[test]
fn geometry_stats_follow_accessors() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let body = model.scene.find_node_by_name("BodyNode").unwrap();
    let mesh = &model.scene.get_node(body).unwrap().meshes[0];

    assert_eq!(mesh.geometry.vertex_count(), 24);
    assert_eq!(mesh.geometry.index_count(), 36);
    assert_eq!(mesh.geometry.attribute("NORMAL").unwrap().item_size, 12);
    assert_eq!(mesh.geometry.attribute("TEXCOORD_0").unwrap().item_size, 8);
    // 24 * 12 (position) + 24 * 12 (normal) + 24 * 8 (uv) + 36 * 2 (u16 indices)
    assert_eq!(mesh.geometry.byte_length(), 840);
    assert!(!mesh.geometry.is_compressed());
}

#[test]
fn variant_mappings_are_attached_to_primitives() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let body = model.scene.find_node_by_name("BodyNode").unwrap();
    let mesh = &model.scene.get_node(body).unwrap().meshes[0];

    assert_eq!(mesh.variant_mappings.len(), 2);
    assert_eq!(mesh.material_for_variant(common::MIDNIGHT), Some(common::RED));
    assert_eq!(mesh.material_for_variant(common::BEACH), Some(common::BLUE));
    assert_eq!(mesh.material_for_variant(7), None);
    assert_eq!(model.variant_names(), vec!["Midnight", "Beach"]);
}

#[test]
fn missing_scene_yields_empty_graph() {
    let mut b = GlbBuilder::new();
    b.mesh(Some("Orphan"), vec![Prim::new(3)]);
    b.node(Some("Orphan"), Some(0), &[]);
    // No root registered: the default scene is empty.
    let model = GlbLoader::decode(&b.build()).unwrap();
    assert_eq!(model.scene.node_count(), 0);
    assert_eq!(model.scene.mesh_count(), 0);
}

// ============================================================================
// Materials
// ============================================================================

#[test]
fn only_primary_materials_are_decoded_eagerly() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let materials = &model.scene.materials;

    // Base (shared by three primitives) + the glTF default material for Legs_1.
    assert_eq!(materials.len(), 2);
    assert_eq!(materials.get_by_index(BASE).unwrap().name.as_deref(), Some("Base"));
    assert!(materials.handle_for_index(common::RED).is_none());
    assert!(materials.handle_for_index(common::BLUE).is_none());
}

#[test]
fn primitives_without_material_share_the_default() {
    let mut b = GlbBuilder::new();
    let mesh = b.mesh(Some("Pair"), vec![Prim::new(3), Prim::new(6)]);
    let node = b.node(None, Some(mesh), &[]);
    b.root(node);

    let mut model = GlbLoader::decode(&b.build()).unwrap();
    let assigned = model.scene.assigned_materials();
    assert_eq!(assigned.len(), 2);
    assert_eq!(assigned[0], assigned[1]);
    assert_eq!(assigned[0], model.scene.default_material());

    let default = model.scene.materials.get(assigned[0]).unwrap();
    assert_eq!(default.index, None);
    assert_eq!(default.label(), "Default");
}

#[test]
fn shared_material_is_decoded_once() {
    let model = GlbLoader::decode(&variant_chair()).unwrap();
    let assigned = model.scene.assigned_materials();
    let base = model.scene.materials.handle_for_index(BASE).unwrap();

    // Body, Legs_0 and the unnamed mesh all use Base.
    assert_eq!(assigned.iter().filter(|&&h| h == base).count(), 3);
}

// ============================================================================
// DRACO Primitives
// ============================================================================

#[test]
fn draco_primitive_decodes_without_buffer_views() {
    common::init_logger();
    let mut b = GlbBuilder::new();
    b.extension_required("KHR_draco_mesh_compression");
    let draco = b.mesh(Some("Draco"), vec![Prim::new(64).indexed(96).normals().uvs().compressed()]);
    let plain = b.mesh(Some("Plain"), vec![Prim::new(3)]);
    let nd = b.node(None, Some(draco), &[]);
    let np = b.node(None, Some(plain), &[]);
    b.root(nd).root(np);

    let model = GlbLoader::decode(&b.build()).unwrap();
    assert_eq!(model.extensions_required, vec!["KHR_draco_mesh_compression"]);

    let mut meshes = Vec::new();
    model.scene.for_each_mesh(|_, mesh| meshes.push(mesh.clone()));
    assert!(meshes[0].geometry.is_compressed());
    assert_eq!(meshes[0].geometry.vertex_count(), 64);
    assert_eq!(meshes[0].geometry.index_count(), 96);
    assert!(!meshes[1].geometry.is_compressed());
}

#[test]
fn missing_buffer_view_outside_draco_is_rejected() {
    let mut b = GlbBuilder::new();
    let mesh = b.mesh(Some("Broken"), vec![Prim::new(3).detached()]);
    let node = b.node(None, Some(mesh), &[]);
    b.root(node);

    match GlbLoader::decode(&b.build()) {
        Err(ViewerError::GltfError(message)) => assert!(message.contains("bufferView"), "{message}"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("accessor without data must not validate"),
    }
}

// ============================================================================
// Background Decoding
// ============================================================================

#[test]
fn background_decoder_delivers_tagged_result() {
    let mut session = Session::default();
    let decoder = BackgroundDecoder::new();

    let request = session
        .select_file(&SelectedFile::from_bytes("chair.glb", variant_chair()))
        .unwrap();
    let ticket = request.ticket;
    decoder.spawn(request);

    let done = decoder.recv_timeout(Duration::from_secs(10)).expect("decode result");
    assert_eq!(done.ticket, ticket);
    assert!(session.finish_load(done.ticket, done.result));
    assert_eq!(session.info().unwrap().mesh_count(), 4);
}
