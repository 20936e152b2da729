/// Resource-level cubemap: six square faces uploaded as one 6-layer texture.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::renderer::{
    Renderer,
    Texture as RenderTexture,
    TextureDesc, TextureFormat, TextureId, TextureUsage,
};
use super::lazy::{LazyGpu, LoadState};
use super::texture::TextureData;

/// Cube face, in GPU layer order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All faces in layer order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Array layer of this face
    pub fn layer(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "+X",
            CubeFace::NegativeX => "-X",
            CubeFace::PositiveY => "+Y",
            CubeFace::NegativeY => "-Y",
            CubeFace::PositiveZ => "+Z",
            CubeFace::NegativeZ => "-Z",
        }
    }
}

/// Environment cubemap with deferred GPU allocation
pub struct Cubemap {
    name: String,
    faces: [TextureData; 6],
    gpu: LazyGpu<Arc<dyn RenderTexture>>,
}

impl Cubemap {
    /// Create an unloaded cubemap; `faces` follow `CubeFace::ALL` order
    pub fn new(name: impl Into<String>, faces: [TextureData; 6]) -> Self {
        Self {
            name: name.into(),
            faces,
            gpu: LazyGpu::new(),
        }
    }

    /// Cubemap whose six faces share one color
    pub fn solid(name: impl Into<String>, size: u32, rgba: [u8; 4]) -> Self {
        Self::new(name, std::array::from_fn(|_| TextureData::solid(size, size, rgba)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn face(&self, face: CubeFace) -> &TextureData {
        &self.faces[face.layer() as usize]
    }

    /// Edge length of a face in pixels
    pub fn size(&self) -> u32 {
        self.faces[0].width
    }

    /// Faces must be valid, square and all the same size
    pub fn validate(&self) -> std::result::Result<(), String> {
        let size = self.size();
        for face in CubeFace::ALL {
            let data = self.face(face);
            data.validate().map_err(|reason| format!("face {}: {}", face.label(), reason))?;
            if data.width != data.height {
                return Err(format!("face {} is not square ({}x{})", face.label(), data.width, data.height));
            }
            if data.width != size {
                return Err(format!("face {} is {} pixels, expected {}", face.label(), data.width, size));
            }
        }
        Ok(())
    }

    /// Create the 6-layer GPU texture if this is the first use
    pub fn ensure_loaded(&self, renderer: &mut dyn Renderer) -> Result<&Arc<dyn RenderTexture>> {
        self.gpu.ensure_loaded(|| {
            self.validate().map_err(|reason| {
                crate::engine_warn!("sandbox3d::Cubemap", "Cubemap '{}' rejected: {}", self.name, reason);
                Error::ResourceLoadFailed(format!("Cubemap '{}': {}", self.name, reason))
            })?;

            let data = self.faces.iter().flat_map(|f| f.pixels.iter().copied()).collect();
            let texture = renderer.create_texture(TextureDesc {
                name: self.name.clone(),
                width: self.size(),
                height: self.size(),
                format: TextureFormat::R8G8B8A8_SRGB,
                usage: TextureUsage::Sampled,
                array_layers: 6,
                data: Some(data),
            }).map_err(|e| {
                crate::engine_warn!("sandbox3d::Cubemap", "Cubemap '{}' allocation failed: {}", self.name, e);
                e
            })?;

            crate::engine_debug!("sandbox3d::Cubemap", "Allocated cubemap '{}' ({}px faces)",
                self.name, self.size());
            Ok(texture)
        })
    }

    /// GPU id, allocating on first call (`TextureId::NULL` on failure)
    pub fn id(&self, renderer: &mut dyn Renderer) -> TextureId {
        self.ensure_loaded(renderer).map(|t| t.id()).unwrap_or(TextureId::NULL)
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

    pub fn failure(&self) -> Option<&str> {
        self.gpu.failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::mock_renderer::MockRenderer;

    #[test]
    fn test_face_layers_follow_declaration_order() {
        let layers: Vec<u32> = CubeFace::ALL.iter().map(|f| f.layer()).collect();
        assert_eq!(layers, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_solid_cubemap_loads_six_layers() {
        let mut renderer = MockRenderer::new();
        let cubemap = Cubemap::solid("sky", 8, [10, 20, 30, 255]);

        let texture = cubemap.ensure_loaded(&mut renderer).unwrap();
        assert_eq!(texture.info().array_layers, 6);
        assert_eq!(texture.info().width, 8);
        assert!(!cubemap.id(&mut renderer).is_null());
        assert_eq!(renderer.created_textures().len(), 1);
    }

    #[test]
    fn test_mismatched_face_fails() {
        let mut renderer = MockRenderer::new();
        let mut faces: [TextureData; 6] = std::array::from_fn(|_| TextureData::solid(4, 4, [0; 4]));
        faces[3] = TextureData::solid(2, 2, [0; 4]);
        let cubemap = Cubemap::new("sky", faces);

        assert!(cubemap.id(&mut renderer).is_null());
        assert!(cubemap.is_failed());
        assert!(cubemap.failure().unwrap().contains("-Y"));
    }

    #[test]
    fn test_non_square_face_fails() {
        let faces: [TextureData; 6] = std::array::from_fn(|_| TextureData::solid(4, 2, [0; 4]));
        let cubemap = Cubemap::new("sky", faces);
        assert!(cubemap.validate().unwrap_err().contains("not square"));
    }
}
