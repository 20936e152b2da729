/// Mesh preview: draws a mesh from a fixed orbit camera framed on its bounds,
/// with an optional wireframe overlay.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::renderer::{IndexType, PreviewProgram, PrimitiveTopology, Renderer};
use crate::resource::{Mesh, MeshKey, ResourceManager};
use crate::scene::Bounds;
use super::offscreen::OffscreenTarget;
use super::resource_renderer::ResourceRenderer;
use super::ui::PreviewUi;

/// What the mesh pass writes to color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshAttribute {
    /// Simple head-light shading
    Shaded,
    Normals,
    Uvs,
    /// Object-space position, normalized to the bounds
    Positions,
}

impl MeshAttribute {
    pub const ALL: [MeshAttribute; 4] = [
        MeshAttribute::Shaded,
        MeshAttribute::Normals,
        MeshAttribute::Uvs,
        MeshAttribute::Positions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MeshAttribute::Shaded => "Shaded",
            MeshAttribute::Normals => "Normals",
            MeshAttribute::Uvs => "UVs",
            MeshAttribute::Positions => "Positions",
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct MeshPushConstants {
    view_projection: [[f32; 4]; 4],
    color: [f32; 4],
    attribute: u32,
    _pad: [u32; 3],
}

/// Camera distance in bounding radii
const FRAMING_DISTANCE: f32 = 3.0;
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
const WIREFRAME_COLOR: [f32; 4] = [1.0, 0.6, 0.0, 1.0];

pub struct MeshPreview {
    target: OffscreenTarget,
    attribute: MeshAttribute,
    wireframe: bool,
    /// Orbit angle around the vertical axis, radians
    yaw: f32,
    clear_color: [f32; 4],
    placeholder_color: [f32; 4],
}

impl MeshPreview {
    pub fn attribute(&self) -> MeshAttribute {
        self.attribute
    }

    pub fn set_attribute(&mut self, attribute: MeshAttribute) {
        self.attribute = attribute;
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// View and projection framing `bounds`
    ///
    /// Depends only on the bounds, the yaw and the aspect ratio, so the same
    /// mesh always previews the same way.
    pub fn camera_matrices(bounds: &Bounds, yaw: f32, aspect: f32) -> (Mat4, Mat4) {
        let center = if bounds.is_empty() { Vec3::ZERO } else { bounds.center() };
        let radius = bounds.half_extents().length().max(1e-3);
        let direction = Mat4::from_rotation_y(yaw).transform_vector3(Vec3::new(1.0, 0.8, 1.4).normalize());
        let eye = center + direction * radius * FRAMING_DISTANCE;

        let view = Mat4::look_at_rh(eye, center, Vec3::Y);
        let near = radius * 0.01;
        let far = radius * (FRAMING_DISTANCE + 2.0);
        let projection = Mat4::perspective_rh(FOV_Y, aspect, near, far);
        (view, projection)
    }
}

impl ResourceRenderer for MeshPreview {
    type Key = MeshKey;
    type Resource = Mesh;
    const KIND: &'static str = "mesh";

    fn lookup(resources: &ResourceManager, key: MeshKey) -> Option<&Mesh> {
        resources.mesh(key)
    }

    fn create(mesh: &Mesh, renderer: &mut dyn Renderer, config: &PreviewConfig) -> Result<Self> {
        let (width, height) = config.mesh_preview_size;
        let name = format!("preview_mesh_{}", mesh.name());
        Ok(Self {
            target: OffscreenTarget::new(renderer, &name, width, height)?,
            attribute: MeshAttribute::Shaded,
            wireframe: false,
            yaw: 0.0,
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

    fn render(&mut self, mesh: &Mesh, renderer: &mut dyn Renderer) -> Result<()> {
        let Ok(buffers) = mesh.ensure_loaded(renderer) else {
            return self.target.render_pass(renderer, self.placeholder_color, |_| Ok(()));
        };

        let (view, projection) = Self::camera_matrices(&mesh.bounds(), self.yaw, self.target.aspect());
        let view_projection = (projection * view).to_cols_array_2d();
        let surface = MeshPushConstants {
            view_projection,
            color: [1.0; 4],
            attribute: self.attribute as u32,
            _pad: [0; 3],
        };
        let wire = MeshPushConstants { color: WIREFRAME_COLOR, ..surface };
        let wireframe = self.wireframe;

        self.target.render_pass(renderer, self.clear_color, |cmd| {
            cmd.bind_program(PreviewProgram::MeshAttributes)?;
            cmd.set_topology(PrimitiveTopology::TriangleList)?;
            cmd.bind_vertex_buffer(&buffers.vertex_buffer, 0)?;
            cmd.bind_index_buffer(&buffers.index_buffer, 0, IndexType::U32)?;
            cmd.push_constants(0, bytemuck::bytes_of(&surface))?;
            cmd.draw_indexed(buffers.index_count, 0, 0)?;

            if wireframe {
                cmd.bind_program(PreviewProgram::Wireframe)?;
                cmd.set_topology(PrimitiveTopology::LineList)?;
                cmd.bind_index_buffer(&buffers.edge_buffer, 0, IndexType::U32)?;
                cmd.push_constants(0, bytemuck::bytes_of(&wire))?;
                cmd.draw_indexed(buffers.edge_index_count, 0, 0)?;
            }
            Ok(())
        })
    }

    fn draw_settings(&mut self, ui: &mut dyn PreviewUi) {
        for attribute in MeshAttribute::ALL {
            if ui.radio_button(attribute.label(), self.attribute == attribute) {
                self.attribute = attribute;
            }
        }
        ui.checkbox("Wireframe", &mut self.wireframe);
        ui.slider_f32("Yaw", &mut self.yaw, -std::f32::consts::PI, std::f32::consts::PI);
    }
}
