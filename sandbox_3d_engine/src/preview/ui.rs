/// Immediate-mode UI seam.
///
/// The core draws previews and the scene outline through this trait; the
/// widget library behind it (and its layout) belongs to the application.
/// Every call happens once per frame on the render thread.

use crate::renderer::TextureId;

pub trait PreviewUi {
    /// Show a texture at `size` pixels, optionally mirrored
    fn image(&mut self, texture: TextureId, size: (u32, u32), flip_x: bool, flip_y: bool);

    fn label(&mut self, text: &str);

    /// Checkbox bound to `value`; returns true when the user toggled it this frame
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    /// Radio button; returns true when clicked this frame
    fn radio_button(&mut self, label: &str, active: bool) -> bool;

    /// Slider bound to `value`; returns true when changed this frame
    fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool;

    /// Returns true when clicked this frame
    fn button(&mut self, label: &str) -> bool;

    /// Open a collapsible tree row; when it returns true, call `tree_pop` after the children
    fn tree_node(&mut self, label: &str, leaf: bool) -> bool;

    fn tree_pop(&mut self);
}
