/// Offscreen color + depth/stencil target owned by one preview renderer.
///
/// Allocated immediately on construction: a preview renderer only exists
/// because the UI asked to show something, so there is nothing to defer.

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{
    ClearValue, CommandList, Rect2D, RenderTarget, RenderTargetDesc, Renderer,
    TextureFormat, TextureId, Viewport,
};

pub struct OffscreenTarget {
    target: Arc<dyn RenderTarget>,
    flip_x: bool,
    flip_y: bool,
}

impl OffscreenTarget {
    /// Allocate a `width` x `height` target (both clamped to at least 1)
    pub fn new(renderer: &mut dyn Renderer, name: &str, width: u32, height: u32) -> Result<Self> {
        let target = renderer.create_render_target(&RenderTargetDesc {
            name: name.to_string(),
            width: width.max(1),
            height: height.max(1),
            color_format: TextureFormat::R8G8B8A8_UNORM,
            depth_stencil_format: Some(TextureFormat::D24_UNORM_S8_UINT),
        })?;
        Ok(Self {
            target,
            flip_x: false,
            flip_y: false,
        })
    }

    /// Identity of the color buffer shown by the UI
    pub fn id(&self) -> TextureId {
        self.target.color_texture().id()
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }

    pub fn render_target(&self) -> &Arc<dyn RenderTarget> {
        &self.target
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    pub fn set_flip_y(&mut self, flip: bool) {
        self.flip_y = flip;
    }

    /// Record one render pass into this target and submit it
    ///
    /// The pass clears color to `clear_color` and depth to 1, covers the whole
    /// target, then runs `draw`.
    pub fn render_pass<F>(&self, renderer: &mut dyn Renderer, clear_color: [f32; 4], draw: F) -> Result<()>
    where
        F: FnOnce(&mut dyn CommandList) -> Result<()>,
    {
        let mut cmd = renderer.create_command_list()?;
        cmd.begin()?;
        cmd.begin_render_pass(&self.target, &[
            ClearValue::Color(clear_color),
            ClearValue::DepthStencil { depth: 1.0, stencil: 0 },
        ])?;
        cmd.set_viewport(Viewport::full(self.width(), self.height()))?;
        cmd.set_scissor(Rect2D { x: 0, y: 0, width: self.width(), height: self.height() })?;
        draw(cmd.as_mut())?;
        cmd.end_render_pass()?;
        cmd.end()?;
        renderer.submit(&[cmd.as_ref()])
    }
}
