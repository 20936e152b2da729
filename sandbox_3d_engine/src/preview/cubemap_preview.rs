/// Cubemap preview: a unit cube sampled through the cubemap, seen from outside.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::renderer::{IndexType, PreviewProgram, PrimitiveTopology, Renderer};
use crate::resource::{procedural, CubeFace, Cubemap, CubemapKey, Mesh, ResourceManager};
use super::offscreen::OffscreenTarget;
use super::resource_renderer::ResourceRenderer;
use super::ui::PreviewUi;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct CubemapPushConstants {
    view_projection: [[f32; 4]; 4],
    exposure: f32,
    /// Layer to isolate, -1 for all faces
    face: i32,
    _pad: [f32; 2],
}

pub struct CubemapPreview {
    target: OffscreenTarget,
    cube: Mesh,
    /// `None` shows the whole cube, `Some` isolates one face
    face: Option<CubeFace>,
    yaw: f32,
    exposure: f32,
    clear_color: [f32; 4],
    placeholder_color: [f32; 4],
}

impl CubemapPreview {
    pub fn face(&self) -> Option<CubeFace> {
        self.face
    }

    pub fn set_face(&mut self, face: Option<CubeFace>) {
        self.face = face;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    fn view_projection(&self) -> Mat4 {
        let eye = Mat4::from_rotation_y(self.yaw).transform_point3(Vec3::new(2.0, 1.5, 2.5));
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, self.target.aspect(), 0.1, 10.0);
        projection * view
    }
}

impl ResourceRenderer for CubemapPreview {
    type Key = CubemapKey;
    type Resource = Cubemap;
    const KIND: &'static str = "cubemap";

    fn lookup(resources: &ResourceManager, key: CubemapKey) -> Option<&Cubemap> {
        resources.cubemap(key)
    }

    fn create(cubemap: &Cubemap, renderer: &mut dyn Renderer, config: &PreviewConfig) -> Result<Self> {
        let (width, height) = config.cubemap_preview_size;
        let name = format!("preview_cubemap_{}", cubemap.name());
        Ok(Self {
            target: OffscreenTarget::new(renderer, &name, width, height)?,
            cube: procedural::cube(format!("{}_cube", name), 0.5),
            face: None,
            yaw: 0.0,
            exposure: 1.0,
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

    fn render(&mut self, cubemap: &Cubemap, renderer: &mut dyn Renderer) -> Result<()> {
        let Ok(texture) = cubemap.ensure_loaded(renderer).cloned() else {
            return self.target.render_pass(renderer, self.placeholder_color, |_| Ok(()));
        };
        let cube = self.cube.ensure_loaded(renderer)?;

        let constants = CubemapPushConstants {
            view_projection: self.view_projection().to_cols_array_2d(),
            exposure: self.exposure,
            face: self.face.map(|f| f.layer() as i32).unwrap_or(-1),
            _pad: [0.0; 2],
        };
        self.target.render_pass(renderer, self.clear_color, |cmd| {
            cmd.bind_program(PreviewProgram::CubemapFaces)?;
            cmd.set_topology(PrimitiveTopology::TriangleList)?;
            cmd.bind_texture(0, &texture)?;
            cmd.bind_vertex_buffer(&cube.vertex_buffer, 0)?;
            cmd.bind_index_buffer(&cube.index_buffer, 0, IndexType::U32)?;
            cmd.push_constants(0, bytemuck::bytes_of(&constants))?;
            cmd.draw_indexed(cube.index_count, 0, 0)
        })
    }

    fn draw_settings(&mut self, ui: &mut dyn PreviewUi) {
        if ui.radio_button("All faces", self.face.is_none()) {
            self.face = None;
        }
        for face in CubeFace::ALL {
            if ui.radio_button(face.label(), self.face == Some(face)) {
                self.face = Some(face);
            }
        }
        ui.slider_f32("Yaw", &mut self.yaw, -std::f32::consts::PI, std::f32::consts::PI);
        ui.slider_f32("Exposure", &mut self.exposure, 0.1, 8.0);
    }
}
