/// Configuration for the scene graph and the preview renderers

/// Scene configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Largest half-extent of the content after `Scene::fit_to_ideal_size`
    pub ideal_half_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ideal_half_size: 1.0,
        }
    }
}

/// Cache policy for `OnDemandRenderer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Renderers live until explicitly removed or cleared (session-scoped cache)
    #[default]
    Never,
    /// Keep at most `capacity` renderers, dropping the least recently drawn first
    LeastRecentlyUsed {
        /// Maximum number of live renderers (values below 1 behave as 1)
        capacity: usize,
    },
}

/// Preview renderer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Offscreen size used for mesh previews
    pub mesh_preview_size: (u32, u32),
    /// Offscreen size used for cubemap previews
    pub cubemap_preview_size: (u32, u32),
    /// Texture previews use the texture's own size, clamped to this on the longest side
    pub max_texture_preview_size: u32,
    /// Clear color of every preview target
    pub clear_color: [f32; 4],
    /// Clear color shown in place of a resource that failed to load
    pub placeholder_color: [f32; 4],
    /// Eviction policy of the per-resource renderer cache
    pub eviction: EvictionPolicy,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            mesh_preview_size: (256, 256),
            cubemap_preview_size: (256, 256),
            max_texture_preview_size: 1024,
            clear_color: [0.1, 0.1, 0.1, 1.0],
            placeholder_color: [1.0, 0.0, 1.0, 1.0],
            eviction: EvictionPolicy::Never,
        }
    }
}

impl PreviewConfig {
    /// Size of a texture preview target for a `width` x `height` texture
    ///
    /// Keeps the aspect ratio, never returns a zero dimension.
    pub fn texture_preview_size(&self, width: u32, height: u32) -> (u32, u32) {
        let width = width.max(1);
        let height = height.max(1);
        let longest = width.max(height);
        let limit = self.max_texture_preview_size.max(1);
        if longest <= limit {
            return (width, height);
        }
        let scale = limit as f64 / longest as f64;
        (
            ((width as f64 * scale).round() as u32).max(1),
            ((height as f64 * scale).round() as u32).max(1),
        )
    }
}
