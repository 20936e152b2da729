//! Resource management module
//!
//! Textures, meshes and cubemaps are created in a descriptor-only state and
//! allocate their GPU objects on first use. `ResourceManager` owns them.

mod lazy;
mod resource_manager;
pub mod texture;
pub mod mesh;
pub mod cubemap;
pub mod procedural;

pub use lazy::{LazyGpu, LoadState};
pub use resource_manager::{ResourceManager, TextureKey, MeshKey, CubemapKey};
pub use texture::{Texture, TextureData};
pub use mesh::{Mesh, MeshBuffers, Vertex};
pub use cubemap::{Cubemap, CubeFace};
