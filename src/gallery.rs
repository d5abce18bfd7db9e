//! Scene assembly: the fixed row of image planes.
//!
//! One plane per source image, laid out along x with a constant vertical
//! offset, each spun a quarter turn about the depth axis. The rectangle
//! geometry is shared and immutable, while everything per-plane (transform,
//! time uniform, texture binding, uniform buffer) is owned by its
//! [`PlaneInstance`], so writing one plane's uniforms can never bleed into
//! another's.

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::GpuContext;
use crate::plane_pass::PlanePass;
use crate::quad::{PLANE_HEIGHT, PLANE_WIDTH, Quad};
use crate::texture::{Texture, TextureError};

/// Vertical offset of the whole row.
pub const ROW_Y: f32 = -1.0;
/// Horizontal offset: plane `i` sits at `i + ROW_X_OFFSET`.
pub const ROW_X_OFFSET: f32 = -1.0;
/// Quarter turn about the depth axis applied to every plane.
pub const PLANE_SPIN: f32 = std::f32::consts::FRAC_PI_2;

/// Per-plane shader uniforms, written every tick before rendering.
///
/// `time` is uploaded each frame but the plane fragment stage does not read
/// it yet; the slot is reserved for per-plane animation.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniforms {
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub _padding: [f32; 3],
}

/// CPU-side state for one plane: placement plus its uniform values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneState {
    pub position: Vec3,
    pub rotation: Quat,
    pub time: f32,
}

impl PlaneState {
    /// Placement for the plane at `index` in the row.
    pub fn at_index(index: usize) -> Self {
        Self {
            position: Vec3::new(index as f32 + ROW_X_OFFSET, ROW_Y, 0.0),
            rotation: Quat::from_rotation_z(PLANE_SPIN),
            time: 0.0,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn uniforms(&self) -> PlaneUniforms {
        PlaneUniforms {
            model: self.model_matrix().to_cols_array_2d(),
            time: self.time,
            _padding: [0.0; 3],
        }
    }
}

/// Placement for a row of `count` planes.
pub fn layout_row(count: usize) -> Vec<PlaneState> {
    (0..count).map(PlaneState::at_index).collect()
}

/// One textured plane with its own GPU uniform buffer and bind groups.
pub struct PlaneInstance {
    pub state: PlaneState,
    #[allow(dead_code)]
    texture: Texture,
    uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bind_group: wgpu::BindGroup,
    pub(crate) texture_bind_group: wgpu::BindGroup,
}

/// The assembled scene: shared quad geometry plus all plane instances.
///
/// Built once at startup from the compiled-in image list; planes are never
/// added or removed afterwards.
pub struct Gallery {
    pub(crate) quad: Quad,
    planes: Vec<PlaneInstance>,
}

impl Gallery {
    /// Load every image and build its plane.
    ///
    /// The first texture that fails to load aborts assembly; the error
    /// carries the offending path.
    pub fn new(
        gpu: &GpuContext,
        pass: &PlanePass,
        sources: &[impl AsRef<Path>],
    ) -> Result<Self, TextureError> {
        let quad = Quad::new(gpu, PLANE_WIDTH, PLANE_HEIGHT);

        let mut planes = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let texture = Texture::from_file(gpu, source)?;
            log::debug!(
                "plane {index}: {} ({}x{})",
                source.as_ref().display(),
                texture.width,
                texture.height
            );

            let state = PlaneState::at_index(index);
            let uniform_buffer =
                gpu.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Plane {index} Uniforms")),
                        contents: bytemuck::bytes_of(&state.uniforms()),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
            let uniform_bind_group = pass.create_plane_bind_group(gpu, &uniform_buffer);
            let texture_bind_group = pass.create_texture_bind_group(gpu, &texture);

            planes.push(PlaneInstance {
                state,
                texture,
                uniform_buffer,
                uniform_bind_group,
                texture_bind_group,
            });
        }

        log::info!("gallery assembled: {} planes", planes.len());
        Ok(Self { quad, planes })
    }

    /// Write `time` into every plane's CPU-side uniforms.
    pub fn set_time(&mut self, time: f32) {
        for plane in &mut self.planes {
            plane.state.time = time;
        }
    }

    /// Push every plane's uniforms to its GPU buffer.
    pub fn upload(&self, queue: &wgpu::Queue) {
        for plane in &self.planes {
            queue.write_buffer(
                &plane.uniform_buffer,
                0,
                bytemuck::bytes_of(&plane.state.uniforms()),
            );
        }
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub(crate) fn planes(&self) -> &[PlaneInstance] {
        &self.planes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_of_ten_spans_minus_one_to_eight() {
        let row = layout_row(10);
        assert_eq!(row.len(), 10);
        for (i, plane) in row.iter().enumerate() {
            assert_eq!(plane.position.x, i as f32 - 1.0);
            assert_eq!(plane.position.y, -1.0);
            assert_eq!(plane.position.z, 0.0);
        }
        assert_eq!(row[0].position.x, -1.0);
        assert_eq!(row[9].position.x, 8.0);
    }

    #[test]
    fn planes_are_spun_a_quarter_turn() {
        let plane = PlaneState::at_index(0);
        let (axis, angle) = plane.rotation.to_axis_angle();
        assert!((axis.z.abs() - 1.0).abs() < 1e-6);
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn model_matrix_places_the_plane() {
        let plane = PlaneState::at_index(4);
        let origin = plane.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(3.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn time_updates_are_isolated_per_plane() {
        let mut row = layout_row(3);
        row[1].time = 42.0;
        assert_eq!(row[0].time, 0.0);
        assert_eq!(row[1].time, 42.0);
        assert_eq!(row[2].time, 0.0);

        assert_eq!(row[0].uniforms().time, 0.0);
        assert_eq!(row[1].uniforms().time, 42.0);
    }

    #[test]
    fn uniform_block_is_tightly_aligned() {
        // mat4 + f32 + padding, 16-byte aligned for the uniform buffer.
        assert_eq!(std::mem::size_of::<PlaneUniforms>(), 80);
    }
}
