/// Renderer module - graphics device abstraction used by resources and previews

pub mod renderer;
pub mod texture;
pub mod buffer;
pub mod render_target;
pub mod command_list;

pub use renderer::*;
pub use texture::*;
pub use buffer::*;
pub use render_target::*;
pub use command_list::*;

// Mock renderer for tests (no GPU required)
#[cfg(test)]
pub mod mock_renderer;
