/// Texture preview: draws a 2D texture through a channel mask.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::renderer::{PreviewProgram, PrimitiveTopology, Renderer};
use crate::resource::{ResourceManager, Texture, TextureKey};
use super::offscreen::OffscreenTarget;
use super::resource_renderer::ResourceRenderer;
use super::ui::PreviewUi;

bitflags! {
    /// Channels shown by a texture preview
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelMask: u32 {
        const R = 1 << 0;
        const G = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
        const RGB = Self::R.bits() | Self::G.bits() | Self::B.bits();
    }
}

impl ChannelMask {
    /// Per-channel weights handed to the shader
    pub fn weights(self) -> [f32; 4] {
        [Self::R, Self::G, Self::B, Self::A].map(|c| if self.contains(c) { 1.0 } else { 0.0 })
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct TexturePushConstants {
    channel_weights: [f32; 4],
}

pub struct TexturePreview {
    target: OffscreenTarget,
    channels: ChannelMask,
    clear_color: [f32; 4],
    placeholder_color: [f32; 4],
}

impl TexturePreview {
    pub fn channels(&self) -> ChannelMask {
        self.channels
    }

    pub fn set_channels(&mut self, channels: ChannelMask) {
        self.channels = channels;
    }
}

impl ResourceRenderer for TexturePreview {
    type Key = TextureKey;
    type Resource = Texture;
    const KIND: &'static str = "texture";

    fn lookup(resources: &ResourceManager, key: TextureKey) -> Option<&Texture> {
        resources.texture(key)
    }

    /// Target follows the texture's own size, clamped by the config
    fn create(texture: &Texture, renderer: &mut dyn Renderer, config: &PreviewConfig) -> Result<Self> {
        let (width, height) = config.texture_preview_size(texture.width(), texture.height());
        let name = format!("preview_texture_{}", texture.name());
        Ok(Self {
            target: OffscreenTarget::new(renderer, &name, width, height)?,
            channels: ChannelMask::RGB,
            clear_color: config.clear_color,
            placeholder_color: config.placeholder_color,
        })
    }

    fn target(&self) -> &OffscreenTarget {
        &self.target
    }

    fn target_mut(&mut self) -> &mut OffscreenTarget {
        &mut self.target
    }

    fn render(&mut self, texture: &Texture, renderer: &mut dyn Renderer) -> Result<()> {
        let Ok(gpu) = texture.ensure_loaded(renderer).cloned() else {
            return self.target.render_pass(renderer, self.placeholder_color, |_| Ok(()));
        };

        let constants = TexturePushConstants { channel_weights: self.channels.weights() };
        self.target.render_pass(renderer, self.clear_color, |cmd| {
            cmd.bind_program(PreviewProgram::TextureChannels)?;
            cmd.set_topology(PrimitiveTopology::TriangleList)?;
            cmd.bind_texture(0, &gpu)?;
            cmd.push_constants(0, bytemuck::bytes_of(&constants))?;
            // Fullscreen triangle generated in the vertex stage
            cmd.draw(3, 0)
        })
    }

    fn draw_settings(&mut self, ui: &mut dyn PreviewUi) {
        for (label, channel) in [("R", ChannelMask::R), ("G", ChannelMask::G), ("B", ChannelMask::B), ("A", ChannelMask::A)] {
            let mut shown = self.channels.contains(channel);
            if ui.checkbox(label, &mut shown) {
                self.channels.set(channel, shown);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::mock_ui::MockUi;
    use crate::renderer::mock_renderer::MockRenderer;
    use crate::resource::TextureData;

    fn preview_for(texture: &Texture, renderer: &mut MockRenderer) -> TexturePreview {
        TexturePreview::create(texture, renderer, &PreviewConfig::default()).unwrap()
    }

    #[test]
    fn test_channel_weights() {
        assert_eq!(ChannelMask::RGB.weights(), [1.0, 1.0, 1.0, 0.0]);
        assert_eq!((ChannelMask::G | ChannelMask::A).weights(), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_target_sized_to_texture() {
        let mut renderer = MockRenderer::new();
        let texture = Texture::new("wide", TextureData::solid(200, 50, [0; 4]));
        let preview = preview_for(&texture, &mut renderer);
        assert_eq!(preview.target().size(), (200, 50));
        // Creating the preview does not load the texture
        assert!(!texture.is_allocated());
    }

    #[test]
    fn test_render_samples_texture() {
        let mut renderer = MockRenderer::new();
        let texture = Texture::new("albedo", TextureData::solid(4, 4, [0; 4]));
        let mut preview = preview_for(&texture, &mut renderer);

        preview.render(&texture, &mut renderer).unwrap();

        let commands = renderer.recorded_commands();
        assert!(commands.contains(&"bind_program:TextureChannels".to_string()));
        assert!(commands.contains(&format!("bind_texture:0:{}", texture.allocated_id().0)));
        assert!(commands.contains(&"push_constants:16".to_string()));
        assert!(commands.contains(&"draw:3".to_string()));
    }

    #[test]
    fn test_failed_texture_renders_placeholder() {
        let mut renderer = MockRenderer::new();
        let texture = Texture::new("broken", TextureData::new(4, 4, vec![0; 3]));
        let mut preview = preview_for(&texture, &mut renderer);

        preview.render(&texture, &mut renderer).unwrap();

        let commands = renderer.recorded_commands();
        let placeholder = PreviewConfig::default().placeholder_color;
        assert!(commands.contains(&format!("begin_render_pass:{}:{:?}", preview.target().id().0, placeholder)));
        assert!(!commands.iter().any(|c| c.starts_with("draw")));
    }

    #[test]
    fn test_settings_toggle_channels() {
        let mut renderer = MockRenderer::new();
        let texture = Texture::new("albedo", TextureData::solid(4, 4, [0; 4]));
        let mut preview = preview_for(&texture, &mut renderer);

        let mut ui = MockUi::new();
        ui.click("R").click("A");
        preview.draw_ui(&mut ui);

        assert_eq!(preview.channels(), ChannelMask::G | ChannelMask::B | ChannelMask::A);
        assert_eq!(ui.images.len(), 1);
        assert_eq!(ui.images[0].texture, preview.target().id());
    }
}
