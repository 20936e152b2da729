/// Central resource registry.
///
/// Owns every Texture, Mesh and Cubemap loaded into the sandbox. The
/// registry is an ordinary value created at startup and passed by reference
/// to whoever needs lookups; there is no global instance. Keys are stable
/// identities: a key stays valid until its resource is removed and is never
/// reused for another resource, which makes them suitable as preview cache keys.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use super::cubemap::Cubemap;
use super::mesh::Mesh;
use super::texture::Texture;

new_key_type! {
    /// Stable key for a Texture in a ResourceManager
    pub struct TextureKey;
    /// Stable key for a Mesh in a ResourceManager
    pub struct MeshKey;
    /// Stable key for a Cubemap in a ResourceManager
    pub struct CubemapKey;
}

/// Resource registry
pub struct ResourceManager {
    textures: SlotMap<TextureKey, Texture>,
    texture_names: FxHashMap<String, TextureKey>,
    meshes: SlotMap<MeshKey, Mesh>,
    mesh_names: FxHashMap<String, MeshKey>,
    cubemaps: SlotMap<CubemapKey, Cubemap>,
    cubemap_names: FxHashMap<String, CubemapKey>,
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            texture_names: FxHashMap::default(),
            meshes: SlotMap::with_key(),
            mesh_names: FxHashMap::default(),
            cubemaps: SlotMap::with_key(),
            cubemap_names: FxHashMap::default(),
        }
    }

    // ===== TEXTURES =====

    /// Register a texture
    ///
    /// # Errors
    ///
    /// Returns an error if a texture with the same name already exists.
    pub fn add_texture(&mut self, texture: Texture) -> Result<TextureKey> {
        if self.texture_names.contains_key(texture.name()) {
            engine_bail!("sandbox3d::ResourceManager",
                "Texture '{}' already exists", texture.name());
        }
        let name = texture.name().to_string();
        let key = self.textures.insert(texture);
        self.texture_names.insert(name, key);
        Ok(key)
    }

    pub fn texture(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(key)
    }

    pub fn texture_by_name(&self, name: &str) -> Option<(TextureKey, &Texture)> {
        let key = *self.texture_names.get(name)?;
        self.textures.get(key).map(|t| (key, t))
    }

    /// Remove a texture, returning it (its GPU object dies with it)
    pub fn remove_texture(&mut self, key: TextureKey) -> Option<Texture> {
        let texture = self.textures.remove(key)?;
        self.texture_names.remove(texture.name());
        Some(texture)
    }

    pub fn texture_keys(&self) -> impl Iterator<Item = TextureKey> + '_ {
        self.textures.keys()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ===== MESHES =====

    /// Register a mesh
    ///
    /// # Errors
    ///
    /// Returns an error if a mesh with the same name already exists.
    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<MeshKey> {
        if self.mesh_names.contains_key(mesh.name()) {
            engine_bail!("sandbox3d::ResourceManager",
                "Mesh '{}' already exists", mesh.name());
        }
        let name = mesh.name().to_string();
        let key = self.meshes.insert(mesh);
        self.mesh_names.insert(name, key);
        Ok(key)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn mesh_by_name(&self, name: &str) -> Option<(MeshKey, &Mesh)> {
        let key = *self.mesh_names.get(name)?;
        self.meshes.get(key).map(|m| (key, m))
    }

    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Mesh> {
        let mesh = self.meshes.remove(key)?;
        self.mesh_names.remove(mesh.name());
        Some(mesh)
    }

    pub fn mesh_keys(&self) -> impl Iterator<Item = MeshKey> + '_ {
        self.meshes.keys()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    // ===== CUBEMAPS =====

    /// Register a cubemap
    ///
    /// # Errors
    ///
    /// Returns an error if a cubemap with the same name already exists.
    pub fn add_cubemap(&mut self, cubemap: Cubemap) -> Result<CubemapKey> {
        if self.cubemap_names.contains_key(cubemap.name()) {
            engine_bail!("sandbox3d::ResourceManager",
                "Cubemap '{}' already exists", cubemap.name());
        }
        let name = cubemap.name().to_string();
        let key = self.cubemaps.insert(cubemap);
        self.cubemap_names.insert(name, key);
        Ok(key)
    }

    pub fn cubemap(&self, key: CubemapKey) -> Option<&Cubemap> {
        self.cubemaps.get(key)
    }

    pub fn cubemap_by_name(&self, name: &str) -> Option<(CubemapKey, &Cubemap)> {
        let key = *self.cubemap_names.get(name)?;
        self.cubemaps.get(key).map(|c| (key, c))
    }

    pub fn remove_cubemap(&mut self, key: CubemapKey) -> Option<Cubemap> {
        let cubemap = self.cubemaps.remove(key)?;
        self.cubemap_names.remove(cubemap.name());
        Some(cubemap)
    }

    pub fn cubemap_keys(&self) -> impl Iterator<Item = CubemapKey> + '_ {
        self.cubemaps.keys()
    }

    pub fn cubemap_count(&self) -> usize {
        self.cubemaps.len()
    }

    // ===== DIAGNOSTICS =====

    /// Number of resources whose GPU object currently exists
    pub fn allocated_count(&self) -> usize {
        self.textures.values().filter(|t| t.is_allocated()).count()
            + self.meshes.values().filter(|m| m.is_allocated()).count()
            + self.cubemaps.values().filter(|c| c.is_allocated()).count()
    }

    /// Number of resources that failed to load
    pub fn failed_count(&self) -> usize {
        self.textures.values().filter(|t| t.is_failed()).count()
            + self.meshes.values().filter(|m| m.is_failed()).count()
            + self.cubemaps.values().filter(|c| c.is_failed()).count()
    }

    /// Remove every resource
    pub fn clear(&mut self) {
        self.textures.clear();
        self.texture_names.clear();
        self.meshes.clear();
        self.mesh_names.clear();
        self.cubemaps.clear();
        self.cubemap_names.clear();
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
