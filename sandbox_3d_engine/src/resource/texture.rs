/// Resource-level 2D texture.
///
/// Holds the decoded RGBA8 pixels handed over by the importer and creates
/// the GPU texture on first use. Decoding itself happens elsewhere; a texture
/// whose pixels do not match its declared size fails to load and is previewed
/// as a placeholder.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::renderer::{
    Renderer,
    Texture as RenderTexture,
    TextureDesc, TextureFormat, TextureId, TextureUsage,
};
use super::lazy::{LazyGpu, LoadState};

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Tightly packed rows, 4 bytes per pixel
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Wrap already decoded pixels
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    /// Single-color image
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
        Self { width, height, pixels }
    }

    /// Two-color checkerboard with square cells of `cell` pixels
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b };
                pixels.extend_from_slice(&color);
            }
        }
        Self { width, height, pixels }
    }

    /// Expected byte length for the declared size
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Check declared size against the pixel buffer
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("zero-sized image ({}x{})", self.width, self.height));
        }
        if self.pixels.len() != self.expected_len() {
            return Err(format!(
                "pixel data is {} bytes, expected {} for {}x{}",
                self.pixels.len(), self.expected_len(), self.width, self.height
            ));
        }
        Ok(())
    }
}

/// A 2D texture resource with deferred GPU allocation
pub struct Texture {
    name: String,
    data: TextureData,
    srgb: bool,
    gpu: LazyGpu<Arc<dyn RenderTexture>>,
}

impl Texture {
    /// Create an unloaded texture (color data, sRGB encoded)
    pub fn new(name: impl Into<String>, data: TextureData) -> Self {
        Self {
            name: name.into(),
            data,
            srgb: true,
            gpu: LazyGpu::new(),
        }
    }

    /// Create an unloaded texture holding linear data (normal maps, masks)
    pub fn new_linear(name: impl Into<String>, data: TextureData) -> Self {
        Self {
            srgb: false,
            ..Self::new(name, data)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Natural width in pixels (available without loading)
    pub fn width(&self) -> u32 {
        self.data.width
    }

    /// Natural height in pixels (available without loading)
    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn data(&self) -> &TextureData {
        &self.data
    }

    pub fn is_srgb(&self) -> bool {
        self.srgb
    }

    /// Create the GPU texture if this is the first use
    pub fn ensure_loaded(&self, renderer: &mut dyn Renderer) -> Result<&Arc<dyn RenderTexture>> {
        self.gpu.ensure_loaded(|| {
            self.data.validate().map_err(|reason| {
                crate::engine_warn!("sandbox3d::Texture", "Texture '{}' rejected: {}", self.name, reason);
                Error::ResourceLoadFailed(format!("Texture '{}': {}", self.name, reason))
            })?;

            let texture = renderer.create_texture(TextureDesc {
                name: self.name.clone(),
                width: self.data.width,
                height: self.data.height,
                format: if self.srgb { TextureFormat::R8G8B8A8_SRGB } else { TextureFormat::R8G8B8A8_UNORM },
                usage: TextureUsage::Sampled,
                array_layers: 1,
                data: Some(self.data.pixels.clone()),
            }).map_err(|e| {
                crate::engine_warn!("sandbox3d::Texture", "Texture '{}' allocation failed: {}", self.name, e);
                e
            })?;

            crate::engine_debug!("sandbox3d::Texture", "Allocated texture '{}' ({}x{}, id {})",
                self.name, self.data.width, self.data.height, texture.id().0);
            Ok(texture)
        })
    }

    /// GPU id, allocating on first call
    ///
    /// Returns `TextureId::NULL` when the texture failed to load.
    pub fn id(&self, renderer: &mut dyn Renderer) -> TextureId {
        self.ensure_loaded(renderer).map(|t| t.id()).unwrap_or(TextureId::NULL)
    }

    /// GPU id if already allocated, `TextureId::NULL` otherwise (never loads)
    pub fn allocated_id(&self) -> TextureId {
        self.gpu.get().map(|t| t.id()).unwrap_or(TextureId::NULL)
    }

    pub fn state(&self) -> LoadState {
        self.gpu.state()
    }

    pub fn is_allocated(&self) -> bool {
        self.gpu.is_allocated()
    }

    pub fn is_failed(&self) -> bool {
        self.gpu.is_failed()
    }

    /// Why loading failed, if it did
    pub fn failure(&self) -> Option<&str> {
        self.gpu.failure()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
