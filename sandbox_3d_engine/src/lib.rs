/*!
# Sandbox 3D Engine

Scene graph and on-demand resource previews for an interactive 3D sandbox.

The crate owns no window and no GPU backend. It drives a `Renderer` trait
supplied by the application and an immediate-mode UI behind `PreviewUi`.

## Architecture

- **Scene**: `NodeTree` arena of nodes with local transforms, enable and
  highlight flags, and optional Prop/Camera/Light/Trs capabilities. `Scene`
  wraps a tree and serves typed node lists from a cache invalidated on mutation.
- **Resources**: `Texture`, `Mesh` and `Cubemap` allocate their GPU objects on
  first use; `ResourceManager` owns them behind slot-map keys.
- **Previews**: `ResourceRenderer` implementations render one resource into an
  offscreen target; `OnDemandRenderer` keeps one per previewed resource.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod preview;

// Main sandbox3d namespace module
pub mod sandbox3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Renderer factory trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Configuration structs
    pub mod config {
        pub use crate::config::*;
    }

    // Render sub-module with all graphics device types
    pub mod render {
        pub use crate::renderer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Preview sub-module
    pub mod preview {
        pub use crate::preview::*;
    }
}

// Re-export math library at crate root
pub use glam;
