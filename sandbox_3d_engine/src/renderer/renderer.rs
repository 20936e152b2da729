/// Renderer trait - graphics device factory consumed by the core

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    Buffer, BufferDesc, CommandList, RenderTarget, RenderTargetDesc, Texture, TextureDesc,
};

/// Renderer statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Number of live textures (render target attachments included)
    pub textures: u32,
    /// Number of live buffers
    pub buffers: u32,
    /// Number of render targets created so far
    pub render_targets_created: u32,
    /// Number of command lists submitted so far
    pub submissions: u32,
}

/// Main renderer trait
///
/// Central factory for GPU resources. Implemented by backend-specific
/// renderers; every call must happen on the thread owning the graphics
/// context.
pub trait Renderer: Send + Sync {
    /// Create a texture, uploading `desc.data` if present
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a buffer, uploading `desc.data` if present
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create an offscreen render target
    ///
    /// Attachments are allocated immediately.
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Create a command list for recording rendering commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Submit recorded command lists for execution
    fn submit(&self, commands: &[&dyn CommandList]) -> Result<()>;

    /// Get statistics about the renderer
    fn stats(&self) -> RendererStats;
}
