/// ResourceRenderer trait - renders one resource in isolation for UI preview.
///
/// Implementors own an `OffscreenTarget` sized for the resource, a fixed
/// camera/light setup, and whatever per-type toggles their settings panel
/// exposes. `OnDemandRenderer` creates one per previewed resource.

use std::fmt::Debug;
use std::hash::Hash;
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::resource::ResourceManager;
use super::offscreen::OffscreenTarget;
use super::ui::PreviewUi;

pub trait ResourceRenderer: Sized {
    /// Identity of a previewed resource
    type Key: Copy + Eq + Hash + Debug;

    /// Previewed resource type
    type Resource;

    /// Short type name, used in logs and target names
    const KIND: &'static str;

    /// Find the resource behind `key`
    fn lookup(resources: &ResourceManager, key: Self::Key) -> Option<&Self::Resource>;

    /// Build a renderer for `resource`, allocating its offscreen target now
    fn create(resource: &Self::Resource, renderer: &mut dyn Renderer, config: &PreviewConfig) -> Result<Self>;

    fn target(&self) -> &OffscreenTarget;

    fn target_mut(&mut self) -> &mut OffscreenTarget;

    /// Render `resource` into the offscreen target
    ///
    /// A resource that fails to load is not an error: the target is cleared
    /// to the placeholder color instead.
    fn render(&mut self, resource: &Self::Resource, renderer: &mut dyn Renderer) -> Result<()>;

    /// Per-type preview toggles
    fn draw_settings(&mut self, ui: &mut dyn PreviewUi);

    /// Show the last rendered image, the flip toggles, then the settings
    fn draw_ui(&mut self, ui: &mut dyn PreviewUi) {
        let target = self.target_mut();
        ui.image(target.id(), target.size(), target.flip_x(), target.flip_y());

        let mut flip_x = target.flip_x();
        if ui.checkbox("Flip X", &mut flip_x) {
            target.set_flip_x(flip_x);
        }
        let mut flip_y = target.flip_y();
        if ui.checkbox("Flip Y", &mut flip_y) {
            target.set_flip_y(flip_y);
        }

        self.draw_settings(ui);
    }
}
