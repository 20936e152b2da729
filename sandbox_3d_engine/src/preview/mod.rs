//! Preview module
//!
//! Renders single resources offscreen, one renderer per resource, for display
//! through the `PreviewUi` seam.

mod ui;
mod offscreen;
mod resource_renderer;
mod texture_preview;
mod mesh_preview;
mod cubemap_preview;
mod on_demand;

#[cfg(test)]
pub mod mock_ui;

pub use ui::PreviewUi;
pub use offscreen::OffscreenTarget;
pub use resource_renderer::ResourceRenderer;
pub use texture_preview::{TexturePreview, ChannelMask};
pub use mesh_preview::{MeshPreview, MeshAttribute};
pub use cubemap_preview::CubemapPreview;
pub use on_demand::OnDemandRenderer;
