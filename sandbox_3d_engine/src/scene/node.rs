/// Scene graph node.
///
/// A `Node` is plain data: name, local transform, flags and optional
/// capabilities. Its place in a hierarchy (parent and ordered children) is
/// owned by the `NodeTree` it lives in and can only be changed there.

use glam::Mat4;
use slotmap::new_key_type;
use crate::preview::PreviewUi;
use super::components::{Camera, Light, LightKind, Prop, Trs};

new_key_type! {
    /// Stable key for a Node within one NodeTree
    pub struct NodeKey;
}

pub struct Node {
    name: String,
    local: Mat4,
    enabled: bool,
    highlighted: bool,
    pub(super) parent: Option<NodeKey>,
    pub(super) children: Vec<NodeKey>,
    trs: Option<Trs>,
    prop: Option<Prop>,
    camera: Option<Camera>,
    light: Option<Light>,
}

impl Node {
    /// Plain grouping node with an identity transform
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Mat4::IDENTITY,
            enabled: true,
            highlighted: false,
            parent: None,
            children: Vec::new(),
            trs: None,
            prop: None,
            camera: None,
            light: None,
        }
    }

    pub fn prop(name: impl Into<String>, prop: Prop) -> Self {
        Self { prop: Some(prop), ..Self::group(name) }
    }

    pub fn camera(name: impl Into<String>, camera: Camera) -> Self {
        Self { camera: Some(camera), ..Self::group(name) }
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self { light: Some(light), ..Self::group(name) }
    }

    /// Builder: set the local transform
    pub fn with_transform(mut self, local: Mat4) -> Self {
        self.set_local_transform(local);
        self
    }

    /// Builder: drive the local transform from decomposed components
    pub fn with_trs(mut self, trs: Trs) -> Self {
        self.set_trs(trs);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Local transform relative to the parent
    pub fn local_transform(&self) -> Mat4 {
        self.local
    }

    /// Overwrite the local transform
    ///
    /// On a transformed node the matrix is decomposed back into its `Trs`.
    pub fn set_local_transform(&mut self, local: Mat4) {
        self.local = local;
        if let Some(trs) = self.trs.as_mut() {
            *trs = Trs::from_matrix(&local);
        }
    }

    /// Attach (or replace) decomposed components; the local matrix follows them
    pub fn set_trs(&mut self, trs: Trs) {
        self.local = trs.matrix();
        self.trs = Some(trs);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(super) fn set_enabled_flag(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(super) fn set_highlighted_flag(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Parent key, `None` for a tree root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    // ===== CAPABILITIES =====

    pub fn as_trs(&self) -> Option<&Trs> {
        self.trs.as_ref()
    }

    pub fn as_prop(&self) -> Option<&Prop> {
        self.prop.as_ref()
    }

    pub fn as_prop_mut(&mut self) -> Option<&mut Prop> {
        self.prop.as_mut()
    }

    pub fn set_prop(&mut self, prop: Option<Prop>) {
        self.prop = prop;
    }

    pub fn as_camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    pub fn as_light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        self.light.as_mut()
    }

    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }
}

// ===== UI =====

impl Node {
    /// Property panel for this node's own data
    ///
    /// Edits capabilities and the transform only; hierarchy and flags are
    /// edited through `Scene::draw_ui`. `key` is this node's key in its tree
    /// and tags the widget IDs. Returns true if anything changed.
    pub fn draw_ui(&mut self, key: NodeKey, ui: &mut dyn PreviewUi) -> bool {
        let mut changed = false;
        ui.label(&self.name);

        if let Some(mut trs) = self.trs {
            let mut edited = false;
            for (axis, label) in ["X", "Y", "Z"].iter().enumerate() {
                edited |= ui.slider_f32(&format!("Translation {}##{:?}", label, key),
                    &mut trs.translation[axis], -100.0, 100.0);
            }
            let mut scale = trs.scale.x;
            if ui.slider_f32(&format!("Scale##{:?}", key), &mut scale, 0.01, 100.0) {
                trs.scale = glam::Vec3::splat(scale);
                edited = true;
            }
            if edited {
                self.set_trs(trs);
                changed = true;
            }
        }

        if let Some(prop) = &self.prop {
            ui.label(&format!("Mesh: {:?}", prop.mesh));
            if prop.bounds.is_empty() {
                ui.label("Bounds: empty");
            } else {
                ui.label(&format!("Bounds: {:?} .. {:?}", prop.bounds.min(), prop.bounds.max()));
            }
        }

        if let Some(camera) = self.camera.as_mut() {
            changed |= ui.slider_f32(&format!("FOV##{:?}", key), &mut camera.fov_y, 0.1, 3.0);
            changed |= ui.slider_f32(&format!("Far##{:?}", key), &mut camera.far, camera.near + 0.01, 10_000.0);
        }

        if let Some(light) = self.light.as_mut() {
            changed |= ui.slider_f32(&format!("Intensity##{:?}", key), &mut light.intensity, 0.0, 100.0);
            if let LightKind::Point { range } | LightKind::Spot { range, .. } = &mut light.kind {
                changed |= ui.slider_f32(&format!("Range##{:?}", key), range, 0.0, 1000.0);
            }
        }

        changed
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::preview::mock_ui::MockUi;
    use crate::scene::Bounds;
    use slotmap::SlotMap;

    fn keys(count: usize) -> Vec<NodeKey> {
        let mut slots: SlotMap<NodeKey, ()> = SlotMap::with_key();
        (0..count).map(|_| slots.insert(())).collect()
    }

    #[test]
    fn test_set_local_transform_updates_trs() {
        let mut node = Node::group("n").with_trs(Trs::IDENTITY);
        node.set_local_transform(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let trs = node.as_trs().unwrap();
        assert!(trs.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn test_draw_ui_edits_trs_and_transform() {
        let key = keys(1)[0];
        let mut node = Node::group("mover").with_trs(Trs::IDENTITY);
        let mut ui = MockUi::new();
        ui.set_slider(&format!("Translation Y##{:?}", key), 4.0)
            .set_slider(&format!("Scale##{:?}", key), 2.0);

        assert!(node.draw_ui(key, &mut ui));

        let expected = Mat4::from_translation(Vec3::new(0.0, 4.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0));
        assert!(node.local_transform().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_draw_ui_edits_light_range() {
        let key = keys(1)[0];
        let mut node = Node::light("lamp", Light::point(Vec3::ONE, 1.0, 10.0));
        let mut ui = MockUi::new();
        ui.set_slider(&format!("Range##{:?}", key), 25.0);

        assert!(node.draw_ui(key, &mut ui));
        assert_eq!(node.as_light().unwrap().kind, LightKind::Point { range: 25.0 });
        assert_eq!(node.as_light().unwrap().intensity, 1.0);
    }

    #[test]
    fn test_draw_ui_same_names_edit_independently() {
        let ids = keys(2);
        let mut first = Node::light("lamp", Light::point(Vec3::ONE, 1.0, 10.0));
        let mut second = Node::light("lamp", Light::point(Vec3::ONE, 1.0, 10.0));
        let mut ui = MockUi::new();
        ui.set_slider(&format!("Intensity##{:?}", ids[0]), 8.0);

        assert!(first.draw_ui(ids[0], &mut ui));
        assert!(!second.draw_ui(ids[1], &mut ui));
        assert_eq!(first.as_light().unwrap().intensity, 8.0);
        assert_eq!(second.as_light().unwrap().intensity, 1.0);
    }

    #[test]
    fn test_draw_ui_without_input_changes_nothing() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::ONE);
        let mut node = Node::prop("box", Prop::new(None, bounds));
        let mut ui = MockUi::new();

        assert!(!node.draw_ui(keys(1)[0], &mut ui));
        assert_eq!(ui.calls[0], "label:box");
        assert!(ui.calls.iter().any(|c| c.starts_with("label:Bounds:")));
    }
}
