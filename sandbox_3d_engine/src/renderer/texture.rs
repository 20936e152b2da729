/// GPU texture trait, texture descriptor, and texture info

/// Identity of a GPU texture
///
/// Backends hand out non-zero ids. `TextureId::NULL` (0) is reserved for
/// "no GPU object", e.g. a resource that has not been allocated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureId(pub u64);

impl TextureId {
    /// The "no texture" id
    pub const NULL: TextureId = TextureId(0);

    /// Whether this is the "no texture" id
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// Size of one texel in bytes
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_SRGB
            | TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::D32_FLOAT
            | TextureFormat::D24_UNORM_S8_UINT => 4,
        }
    }

    /// Whether this is a depth or depth/stencil format
    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::D32_FLOAT | TextureFormat::D24_UNORM_S8_UINT)
    }
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture can be used as render target
    RenderTarget,
    /// Texture can be used for both
    SampledAndRenderTarget,
    /// Texture can be used as depth/stencil attachment
    DepthStencil,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Number of array layers (6 for cubemaps)
    pub array_layers: u32,
    /// Optional initial data, all layers tightly packed one after the other
    pub data: Option<Vec<u8>>,
}

impl TextureDesc {
    /// Expected byte length of `data` for this descriptor
    pub fn expected_data_len(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.array_layers as usize
            * self.format.bytes_per_pixel() as usize
    }
}

/// Read-only properties of a created texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub array_layers: u32,
}

/// GPU texture trait
///
/// Implemented by backend-specific texture types.
/// The GPU object is destroyed when the last handle is dropped.
pub trait Texture: Send + Sync {
    /// Stable, non-zero identity of this texture
    fn id(&self) -> TextureId;

    /// Properties the texture was created with
    fn info(&self) -> &TextureInfo;
}
