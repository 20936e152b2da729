/// Procedural mesh generators (preview geometry, placeholders, tests).

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use super::mesh::Mesh;

/// Axis-aligned cube centered at the origin, 4 vertices per face
pub fn cube(name: impl Into<String>, half_extent: f32) -> Mesh {
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push((normal + u * su + v * sv) * half_extent);
            normals.push(normal);
            uvs.push(Vec2::new((su + 1.0) * 0.5, (1.0 - sv) * 0.5));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Mesh::new(name, positions, normals, uvs, indices)
}

/// Square in the XZ plane facing +Y
pub fn plane(name: impl Into<String>, half_extent: f32) -> Mesh {
    let h = half_extent;
    Mesh::new(
        name,
        vec![
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(-h, 0.0, -h),
        ],
        vec![Vec3::Y; 4],
        vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)],
        vec![0, 1, 2, 2, 3, 0],
    )
}

/// UV sphere centered at the origin
///
/// `segments` (longitude) is clamped to at least 3 and `rings` (latitude) to at least 2.
/// The seam column is duplicated so uvs stay continuous.
pub fn uv_sphere(name: impl Into<String>, radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * PI;
        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let phi = u * 2.0 * PI;
            let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            positions.push(normal * radius);
            normals.push(normal);
            uvs.push(Vec2::new(u, v));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            // Skip the degenerate triangle at each pole
            if ring != 0 {
                indices.extend_from_slice(&[a, a + 1, b]);
            }
            if ring != rings - 1 {
                indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }

    Mesh::new(name, positions, normals, uvs, indices)
}
