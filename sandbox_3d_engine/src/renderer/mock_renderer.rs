/// Mock Renderer for unit tests (no GPU required)
///
/// Tracks every created object and every submitted command so resources
/// and preview renderers can be tested without a graphics backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::error::Result;
use crate::engine_bail;
use crate::renderer::{
    Buffer, BufferDesc, BufferUsage, ClearValue, CommandList, IndexType, PreviewProgram,
    PrimitiveTopology, Rect2D, RenderTarget, RenderTargetDesc, Renderer, RendererStats,
    Texture, TextureDesc, TextureId, TextureInfo, TextureUsage, Viewport,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub id: TextureId,
    pub info: TextureInfo,
    pub name: String,
}

impl Texture for MockTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub name: String,
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            engine_bail!("sandbox3d::mock",
                "buffer '{}' update out of range ({} + {} > {})",
                self.name, offset, data.len(), self.size);
        }
        Ok(())
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

pub struct MockRenderTarget {
    pub width: u32,
    pub height: u32,
    pub color: Arc<dyn Texture>,
    pub depth_stencil: Option<Arc<dyn Texture>>,
}

impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_texture(&self) -> &Arc<dyn Texture> {
        &self.color
    }

    fn has_depth_stencil(&self) -> bool {
        self.depth_stencil.is_some()
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Records every command into the owning renderer's log
pub struct MockCommandList {
    log: Arc<Mutex<MockRendererLog>>,
}

impl MockCommandList {
    fn push(&mut self, command: String) -> Result<()> {
        self.log.lock().unwrap().recorded_commands.push(command);
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.push("begin".to_string())
    }

    fn end(&mut self) -> Result<()> {
        self.push("end".to_string())
    }

    fn begin_render_pass(
        &mut self,
        target: &Arc<dyn RenderTarget>,
        clear_values: &[ClearValue],
    ) -> Result<()> {
        let color = clear_values.iter().find_map(|value| match value {
            ClearValue::Color(c) => Some(*c),
            _ => None,
        });
        self.push(format!(
            "begin_render_pass:{}:{:?}",
            target.color_texture().id().0,
            color.unwrap_or([0.0; 4])
        ))
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.push("end_render_pass".to_string())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.push(format!("set_viewport:{}x{}", viewport.width, viewport.height))
    }

    fn set_scissor(&mut self, _scissor: Rect2D) -> Result<()> {
        self.push("set_scissor".to_string())
    }

    fn bind_program(&mut self, program: PreviewProgram) -> Result<()> {
        self.push(format!("bind_program:{:?}", program))
    }

    fn set_topology(&mut self, topology: PrimitiveTopology) -> Result<()> {
        self.push(format!("set_topology:{:?}", topology))
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.push(format!("bind_texture:{}:{}", slot, texture.id().0))
    }

    fn bind_vertex_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64) -> Result<()> {
        self.push("bind_vertex_buffer".to_string())
    }

    fn bind_index_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64, _index_type: IndexType) -> Result<()> {
        self.push("bind_index_buffer".to_string())
    }

    fn push_constants(&mut self, _offset: u32, data: &[u8]) -> Result<()> {
        self.push(format!("push_constants:{}", data.len()))
    }

    fn draw(&mut self, vertex_count: u32, _first_vertex: u32) -> Result<()> {
        self.push(format!("draw:{}", vertex_count))
    }

    fn draw_indexed(&mut self, index_count: u32, _first_index: u32, _vertex_offset: i32) -> Result<()> {
        self.push(format!("draw_indexed:{}", index_count))
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

/// Shared, inspectable state of a MockRenderer
#[derive(Default)]
pub struct MockRendererLog {
    pub created_textures: Vec<String>,
    pub created_buffers: Vec<String>,
    pub created_render_targets: Vec<String>,
    pub recorded_commands: Vec<String>,
    pub submissions: u32,
    live_textures: Vec<Weak<MockTexture>>,
    live_buffers: Vec<Weak<MockBuffer>>,
}

/// Mock Renderer that tracks created resources without GPU
pub struct MockRenderer {
    next_texture_id: AtomicU64,
    fail_texture_creation: bool,
    fail_render_target_creation: bool,
    pub log: Arc<Mutex<MockRendererLog>>,
}

impl MockRenderer {
    /// Create a new mock renderer
    pub fn new() -> Self {
        Self {
            next_texture_id: AtomicU64::new(1),
            fail_texture_creation: false,
            fail_render_target_creation: false,
            log: Arc::new(Mutex::new(MockRendererLog::default())),
        }
    }

    /// Mock renderer whose `create_texture` always fails (out of memory)
    pub fn failing_textures() -> Self {
        Self {
            fail_texture_creation: true,
            ..Self::new()
        }
    }

    /// Make later `create_render_target` calls fail (out of memory) or succeed again
    pub fn set_fail_render_targets(&mut self, fail: bool) {
        self.fail_render_target_creation = fail;
    }

    /// Names of created textures
    pub fn created_textures(&self) -> Vec<String> {
        self.log.lock().unwrap().created_textures.clone()
    }

    /// Names of created buffers
    pub fn created_buffers(&self) -> Vec<String> {
        self.log.lock().unwrap().created_buffers.clone()
    }

    /// Names of created render targets
    pub fn created_render_targets(&self) -> Vec<String> {
        self.log.lock().unwrap().created_render_targets.clone()
    }

    /// Every command recorded so far, in order
    pub fn recorded_commands(&self) -> Vec<String> {
        self.log.lock().unwrap().recorded_commands.clone()
    }

    /// Forget recorded commands (keeps resource tracking)
    pub fn clear_recorded(&self) {
        self.log.lock().unwrap().recorded_commands.clear();
    }

    /// Number of command lists submitted so far
    pub fn submission_count(&self) -> u32 {
        self.log.lock().unwrap().submissions
    }

    /// Number of textures still alive
    pub fn live_texture_count(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.live_textures.iter().filter(|t| t.strong_count() > 0).count()
    }

    /// Number of buffers still alive
    pub fn live_buffer_count(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.live_buffers.iter().filter(|b| b.strong_count() > 0).count()
    }

    fn make_texture(&self, name: String, info: TextureInfo) -> Arc<MockTexture> {
        let id = TextureId(self.next_texture_id.fetch_add(1, Ordering::Relaxed));
        let texture = Arc::new(MockTexture { id, info, name: name.clone() });
        let mut log = self.log.lock().unwrap();
        log.created_textures.push(name);
        log.live_textures.push(Arc::downgrade(&texture));
        texture
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MockRenderer {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_creation {
            return Err(crate::error::Error::OutOfMemory);
        }
        if let Some(data) = &desc.data {
            if data.len() != desc.expected_data_len() {
                engine_bail!("sandbox3d::mock",
                    "texture '{}' data is {} bytes, expected {}",
                    desc.name, data.len(), desc.expected_data_len());
            }
        }
        let info = TextureInfo {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            array_layers: desc.array_layers,
        };
        let name = format!("{}_{}x{}", desc.name, desc.width, desc.height);
        Ok(self.make_texture(name, info))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if let Some(data) = &desc.data {
            if data.len() as u64 > desc.size {
                engine_bail!("sandbox3d::mock",
                    "buffer '{}' data is {} bytes, larger than {}",
                    desc.name, data.len(), desc.size);
            }
        }
        let name = format!("{}_{}", desc.name, desc.size);
        let buffer = Arc::new(MockBuffer { size: desc.size, usage: desc.usage, name: name.clone() });
        let mut log = self.log.lock().unwrap();
        log.created_buffers.push(name);
        log.live_buffers.push(Arc::downgrade(&buffer));
        Ok(buffer)
    }

    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        if self.fail_render_target_creation {
            return Err(crate::error::Error::OutOfMemory);
        }
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("sandbox3d::mock",
                "render target '{}' has a zero dimension ({}x{})",
                desc.name, desc.width, desc.height);
        }
        let color = self.make_texture(
            format!("{}_color", desc.name),
            TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.color_format,
                usage: TextureUsage::SampledAndRenderTarget,
                array_layers: 1,
            },
        );
        let depth_stencil = desc.depth_stencil_format.map(|format| {
            let texture: Arc<dyn Texture> = self.make_texture(
                format!("{}_depth", desc.name),
                TextureInfo {
                    width: desc.width,
                    height: desc.height,
                    format,
                    usage: TextureUsage::DepthStencil,
                    array_layers: 1,
                },
            );
            texture
        });
        self.log.lock().unwrap().created_render_targets
            .push(format!("{}_{}x{}", desc.name, desc.width, desc.height));
        Ok(Arc::new(MockRenderTarget {
            width: desc.width,
            height: desc.height,
            color,
            depth_stencil,
        }))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList { log: self.log.clone() }))
    }

    fn submit(&self, commands: &[&dyn CommandList]) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.submissions += commands.len() as u32;
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        let log = self.log.lock().unwrap();
        RendererStats {
            textures: log.live_textures.iter().filter(|t| t.strong_count() > 0).count() as u32,
            buffers: log.live_buffers.iter().filter(|b| b.strong_count() > 0).count() as u32,
            render_targets_created: log.created_render_targets.len() as u32,
            submissions: log.submissions,
        }
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
