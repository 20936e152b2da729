//! Integration tests for the scene graph
//!
//! These tests drive NodeTree and Scene through the public sandbox3d API.
//! No GPU required.
//!
//! Run with: cargo test --test scene_graph_integration_tests

use sandbox_3d_engine::glam::{Mat4, Vec3};
use sandbox_3d_engine::sandbox3d::Error;
use sandbox_3d_engine::sandbox3d::config::SceneConfig;
use sandbox_3d_engine::sandbox3d::scene::{
    Bounds, Camera, Group, Light, Node, NodeCategory, NodeKey, NodeTree, Prop, Scene, Trs,
};

fn unit_prop(name: &str) -> Node {
    Node::prop(name, Prop::new(None, Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0))))
}

/// Root
/// ├── world (translated +10 X)
/// │   ├── crate_a
/// │   └── lamp
/// └── rig
///     └── camera
fn build_tree() -> NodeTree {
    let mut tree = NodeTree::with_root_name("Root");
    let root = tree.root();
    let world = tree
        .add_child(root, Node::group("world").with_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0))))
        .unwrap();
    tree.add_child(world, unit_prop("crate_a")).unwrap();
    tree.add_child(world, Node::light("lamp", Light::point(Vec3::ONE, 5.0, 20.0))).unwrap();
    let rig = tree.add_child(root, Node::group("rig").with_trs(Trs::from_translation(Vec3::Z))).unwrap();
    tree.add_child(rig, Node::camera("camera", Camera::default())).unwrap();
    tree
}

// ============================================================================
// TYPED QUERIES
// ============================================================================

#[test]
fn test_integration_typed_queries() {
    let scene = Scene::new(build_tree());

    let names = |keys: &[NodeKey]| -> Vec<String> {
        keys.iter().map(|k| scene.get(*k).unwrap().name().to_string()).collect()
    };

    assert_eq!(names(scene.get_all::<Prop>()), vec!["crate_a"]);
    assert_eq!(names(scene.get_all::<Light>()), vec!["lamp"]);
    assert_eq!(names(scene.get_all::<Camera>()), vec!["camera"]);
    assert_eq!(names(scene.get_all::<Trs>()), vec!["rig"]);
    // Root excluded, post-order
    assert_eq!(names(scene.get_all::<Group>()), vec!["world"]);
    assert_eq!(scene.get_category(NodeCategory::Prop), scene.get_all::<Prop>());
}

#[test]
fn test_integration_disable_filters_active_lists() {
    let mut scene = Scene::new(build_tree());
    let world = scene.tree().find_by_name("world").unwrap();

    assert_eq!(scene.get_active::<Prop>().len(), 1);
    scene.disable(world).unwrap();

    assert!(scene.get_active::<Prop>().is_empty());
    assert!(scene.get_active::<Light>().is_empty());
    // Disabled nodes stay in the full lists
    assert_eq!(scene.get_all::<Prop>().len(), 1);

    scene.enable(world).unwrap();
    assert_eq!(scene.get_active::<Prop>().len(), 1);
}

#[test]
fn test_integration_clean_reads_do_not_rebuild() {
    let mut scene = Scene::new(build_tree());

    for _ in 0..5 {
        let _ = scene.get_all::<Prop>();
        let _ = scene.get_active::<Camera>();
    }
    assert_eq!(scene.cache_rebuild_count(), 1);

    let root = scene.root();
    scene.add_child(root, unit_prop("crate_b")).unwrap();
    assert!(scene.is_dirty());
    assert_eq!(scene.get_all::<Prop>().len(), 2);
    assert_eq!(scene.cache_rebuild_count(), 2);
}

// ============================================================================
// OWNERSHIP TRANSFER
// ============================================================================

#[test]
fn test_integration_move_subtree_between_scenes() {
    let mut source = Scene::new(build_tree());
    let mut destination = Scene::empty();

    let world = source.tree().find_by_name("world").unwrap();
    let released = source.release(world).unwrap();

    assert!(source.get(world).is_none());
    assert!(source.get_all::<Prop>().is_empty());
    assert_eq!(released.len(), 3);

    let root = destination.root();
    let attached = destination.attach(root, released).unwrap();

    assert_eq!(destination.get(attached).unwrap().name(), "world");
    assert_eq!(destination.get_all::<Prop>().len(), 1);
    assert_eq!(destination.get_all::<Light>().len(), 1);

    // Local transforms travel with the subtree
    let crate_a = destination.tree().find_by_name("crate_a").unwrap();
    let global = destination.global_transform(crate_a).unwrap();
    assert!(global.w_axis.truncate().abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
}

#[test]
fn test_integration_structural_errors() {
    let mut scene = Scene::new(build_tree());
    let root = scene.root();
    let world = scene.tree().find_by_name("world").unwrap();
    let crate_a = scene.tree().find_by_name("crate_a").unwrap();

    assert!(matches!(scene.release(root), Err(Error::InvalidOperation(_))));
    assert!(matches!(scene.transfer(world, crate_a), Err(Error::InvalidOperation(_))));
    assert!(matches!(scene.delete_and_transfer_children(root), Err(Error::InvalidOperation(_))));
    assert!(scene.disable(root).is_err());

    scene.remove(crate_a).unwrap();
    assert!(matches!(scene.remove(crate_a), Err(Error::InvalidNode(_))));
}

#[test]
fn test_integration_flatten_keeps_children() {
    let mut scene = Scene::new(build_tree());
    let world = scene.tree().find_by_name("world").unwrap();

    let moved = scene.delete_and_transfer_children(world).unwrap();

    assert_eq!(moved.len(), 2);
    let root = scene.root();
    let children: Vec<&str> = scene.get(root).unwrap().children().iter()
        .map(|k| scene.get(*k).unwrap().name())
        .collect();
    assert_eq!(children, vec!["crate_a", "lamp", "rig"]);
}

// ============================================================================
// BOUNDS
// ============================================================================

#[test]
fn test_integration_fit_to_ideal_size() {
    let config = SceneConfig { ideal_half_size: 2.0 };
    let mut scene = Scene::with_config(build_tree(), config);

    assert!(scene.fit_to_ideal_size());

    let bounds = scene.bounds();
    assert!(bounds.center().abs_diff_eq(Vec3::ZERO, 1e-4));
    assert!((bounds.largest_half_extent() - 2.0).abs() < 1e-4);
}

#[test]
fn test_integration_fit_empty_scene_is_noop() {
    let mut scene = Scene::empty();
    assert!(!scene.fit_to_ideal_size());
    assert_eq!(scene.get(scene.root()).unwrap().local_transform(), Mat4::IDENTITY);
}
