/// Node capabilities: the optional parts that give a node its dynamic type.

use glam::{Mat4, Quat, Vec3};
use crate::resource::{Mesh, MeshKey};
use super::bounds::Bounds;

// ===== TRS =====

/// Decomposed local transform (translation, rotation, scale)
///
/// A node carrying a `Trs` is a "transformed node": its local matrix is
/// always `T * R * S` of these components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trs {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Trs {
    pub const IDENTITY: Trs = Trs {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    /// Decompose an affine matrix
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self { translation, rotation, scale }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ===== PROP =====

/// Renderable leaf: a mesh reference plus its object-space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub mesh: Option<MeshKey>,
    pub bounds: Bounds,
}

impl Prop {
    pub fn new(mesh: Option<MeshKey>, bounds: Bounds) -> Self {
        Self { mesh, bounds }
    }

    /// Prop drawing `mesh`, bounded by the mesh's own bounds
    pub fn from_mesh(key: MeshKey, mesh: &Mesh) -> Self {
        Self { mesh: Some(key), bounds: mesh.bounds() }
    }
}

// ===== CAMERA =====

/// Perspective camera looking down its local -Z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov_y, aspect, near, far }
    }

    /// Projection matrix (right-handed, depth 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// View matrix for a camera placed by `global_transform`
    pub fn view_matrix(global_transform: &Mat4) -> Mat4 {
        global_transform.inverse()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0)
    }
}

// ===== LIGHT =====

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Shines along the node's local -Z axis from infinitely far
    Directional,
    Point { range: f32 },
    /// Cone angles in radians
    Spot { range: f32, inner_angle: f32, outer_angle: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self { kind: LightKind::Directional, color, intensity }
    }

    pub fn point(color: Vec3, intensity: f32, range: f32) -> Self {
        Self { kind: LightKind::Point { range }, color, intensity }
    }
}
