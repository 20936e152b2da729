//! Resource-level mesh.
//!
//! A `Mesh` keeps its geometry on the CPU (positions, normals, uvs,
//! triangle indices) and uploads it on first use:
//!
//! ```text
//! Mesh "crate"
//! ├── positions / normals / uvs / indices   (always available)
//! └── gpu (lazy)
//!     ├── vertex_buffer   interleaved Vertex
//!     ├── index_buffer    u32 triangle list
//!     └── edge_buffer     u32 line list, one entry per unique edge
//! ```
//!
//! The edge buffer feeds the wireframe overlay of mesh previews.

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use crate::renderer::{Buffer, BufferDesc, BufferUsage, Renderer};
use crate::scene::Bounds;
use super::lazy::{LazyGpu, LoadState};

// ============================================================================
// VERTEX
// ============================================================================

/// Interleaved vertex as laid out in the vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

// ============================================================================
// GPU BUFFERS
// ============================================================================

/// GPU side of a loaded mesh
pub struct MeshBuffers {
    pub vertex_buffer: Arc<dyn Buffer>,
    pub index_buffer: Arc<dyn Buffer>,
    pub index_count: u32,
    pub edge_buffer: Arc<dyn Buffer>,
    pub edge_index_count: u32,
}

// ============================================================================
// MESH
// ============================================================================

/// Triangle mesh with deferred GPU upload
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    bounds: Bounds,
    gpu: LazyGpu<MeshBuffers>,
}

impl Mesh {
    /// Create an unloaded mesh
    ///
    /// Missing normals or uvs (empty vectors) are filled with zeros at upload.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        let bounds = positions.iter().fold(Bounds::empty(), |b, &p| b.union_point(p));
        Self {
            name: name.into(),
            positions,
            normals,
            uvs,
            indices,
            bounds,
            gpu: LazyGpu::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Object-space bounds of the positions
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Check attribute counts and indices
    pub fn validate(&self) -> std::result::Result<(), String> {
        let count = self.positions.len();
        if count == 0 {
            return Err("mesh has no vertices".to_string());
        }
        if !self.normals.is_empty() && self.normals.len() != count {
            return Err(format!("{} normals for {} vertices", self.normals.len(), count));
        }
        if !self.uvs.is_empty() && self.uvs.len() != count {
            return Err(format!("{} uvs for {} vertices", self.uvs.len(), count));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(format!("index count {} is not a non-empty multiple of 3", self.indices.len()));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(format!("index {} out of range ({} vertices)", bad, count));
        }
        Ok(())
    }

    /// Interleave attributes into GPU vertices
    pub fn interleaved_vertices(&self) -> Vec<Vertex> {
        self.positions.iter().enumerate().map(|(i, p)| {
            let normal = self.normals.get(i).copied().unwrap_or(Vec3::ZERO);
            let uv = self.uvs.get(i).copied().unwrap_or(Vec2::ZERO);
            Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            }
        }).collect()
    }

    /// Unique triangle edges as a line list
    ///
    /// Edges shared by two triangles appear once, in first-seen order.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = FxHashSet::default();
        let mut edges = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    edges.push(a);
                    edges.push(b);
                }
            }
        }
        edges
    }

    /// Upload the mesh if this is the first use
    pub fn ensure_loaded(&self, renderer: &mut dyn Renderer) -> Result<&MeshBuffers> {
        self.gpu.ensure_loaded(|| {
            self.validate().map_err(|reason| {
                crate::engine_warn!("sandbox3d::Mesh", "Mesh '{}' rejected: {}", self.name, reason);
                Error::ResourceLoadFailed(format!("Mesh '{}': {}", self.name, reason))
            })?;

            let buffers = self.create_buffers(renderer).map_err(|e| {
                crate::engine_warn!("sandbox3d::Mesh", "Mesh '{}' upload failed: {}", self.name, e);
                e
            })?;

            crate::engine_debug!("sandbox3d::Mesh", "Uploaded mesh '{}' ({} vertices, {} triangles)",
                self.name, self.vertex_count(), self.triangle_count());
            Ok(buffers)
        })
    }

    fn create_buffers(&self, renderer: &mut dyn Renderer) -> Result<MeshBuffers> {
        let vertices = self.interleaved_vertices();
        let edges = self.edge_indices();
        Ok(MeshBuffers {
            vertex_buffer: self.upload(renderer, "vertices", BufferUsage::Vertex, bytemuck::cast_slice(&vertices))?,
            index_buffer: self.upload(renderer, "indices", BufferUsage::Index, bytemuck::cast_slice(&self.indices))?,
            index_count: self.indices.len() as u32,
            edge_buffer: self.upload(renderer, "edges", BufferUsage::Index, bytemuck::cast_slice(&edges))?,
            edge_index_count: edges.len() as u32,
        })
    }

    fn upload(&self, renderer: &mut dyn Renderer, suffix: &str, usage: BufferUsage, bytes: &[u8]) -> Result<Arc<dyn Buffer>> {
        renderer.create_buffer(BufferDesc {
            name: format!("{}_{}", self.name, suffix),
            size: bytes.len() as u64,
            usage,
            data: Some(bytes.to_vec()),
        })
    }

    /// GPU buffers if already uploaded (never loads)
    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.gpu.get()
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
#[path = "mesh_tests.rs"]
mod tests;
