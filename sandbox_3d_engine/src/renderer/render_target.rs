/// Offscreen render target: color attachment plus optional depth/stencil

use std::sync::Arc;
use crate::renderer::{Texture, TextureFormat};

/// Descriptor for creating an offscreen render target
#[derive(Debug, Clone)]
pub struct RenderTargetDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color attachment format (always sampleable, so the UI can display it)
    pub color_format: TextureFormat,
    /// Depth/stencil attachment format, `None` for color-only targets
    pub depth_stencil_format: Option<TextureFormat>,
}

/// Render target trait
///
/// Owns its attachments; they are destroyed with the target.
pub trait RenderTarget: Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// The color attachment, sampleable by the UI
    fn color_texture(&self) -> &Arc<dyn Texture>;

    /// Whether a depth/stencil attachment exists
    fn has_depth_stencil(&self) -> bool;
}
