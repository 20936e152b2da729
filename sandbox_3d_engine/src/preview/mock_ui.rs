/// Scripted PreviewUi for unit tests
///
/// Records every widget call as a string and reports a click for any label
/// registered with `click`. Tree nodes are always open.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::renderer::TextureId;
use super::ui::PreviewUi;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCall {
    pub texture: TextureId,
    pub size: (u32, u32),
    pub flip_x: bool,
    pub flip_y: bool,
}

#[derive(Default)]
pub struct MockUi {
    pub calls: Vec<String>,
    pub images: Vec<ImageCall>,
    clicks: FxHashSet<String>,
    slider_values: FxHashMap<String, f32>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the widget labelled `label` report a click on every frame
    pub fn click(&mut self, label: &str) -> &mut Self {
        self.clicks.insert(label.to_string());
        self
    }

    /// Make the slider labelled `label` move to `value`
    pub fn set_slider(&mut self, label: &str, value: f32) -> &mut Self {
        self.slider_values.insert(label.to_string(), value);
        self
    }

    /// Forget scripted input and recorded calls
    pub fn reset(&mut self) {
        self.calls.clear();
        self.images.clear();
        self.clicks.clear();
        self.slider_values.clear();
    }
}

impl PreviewUi for MockUi {
    fn image(&mut self, texture: TextureId, size: (u32, u32), flip_x: bool, flip_y: bool) {
        self.calls.push(format!("image:{}:{}x{}", texture.0, size.0, size.1));
        self.images.push(ImageCall { texture, size, flip_x, flip_y });
    }

    fn label(&mut self, text: &str) {
        self.calls.push(format!("label:{}", text));
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        self.calls.push(format!("checkbox:{}", label));
        let clicked = self.clicks.contains(label);
        if clicked {
            *value = !*value;
        }
        clicked
    }

    fn radio_button(&mut self, label: &str, active: bool) -> bool {
        self.calls.push(format!("radio:{}:{}", label, active));
        self.clicks.contains(label)
    }

    fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool {
        self.calls.push(format!("slider:{}", label));
        match self.slider_values.get(label) {
            Some(&v) => {
                *value = v.clamp(min, max);
                true
            }
            None => false,
        }
    }

    fn button(&mut self, label: &str) -> bool {
        self.calls.push(format!("button:{}", label));
        self.clicks.contains(label)
    }

    fn tree_node(&mut self, label: &str, _leaf: bool) -> bool {
        self.calls.push(format!("tree_node:{}", label));
        true
    }

    fn tree_pop(&mut self) {
        self.calls.push("tree_pop".to_string());
    }
}
