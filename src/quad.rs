//! The shared plane geometry.
//!
//! Every plane in the gallery renders the same rectangle; the geometry is
//! uploaded once and shared read-only across all instances. Per-plane
//! placement happens entirely through the model matrix.

use wgpu::util::DeviceExt;

use crate::gpu::GpuContext;

/// Width of each image plane in world units.
pub const PLANE_WIDTH: f32 = 1.9 / 2.0;
/// Height of each image plane in world units.
pub const PLANE_HEIGHT: f32 = 1.0 / 2.0;

/// Vertex format for the plane: position and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

/// Vertices and indices for a `width` x `height` rectangle in the XY plane,
/// centered at the origin, facing +Z, CCW winding.
pub fn rect_geometry(width: f32, height: f32) -> ([Vertex; 4], [u32; 6]) {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let vertices = [
        Vertex {
            position: [-hw, hh, 0.0],
            uv: [0.0, 0.0],
        },
        Vertex {
            position: [hw, hh, 0.0],
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [hw, -hh, 0.0],
            uv: [1.0, 1.0],
        },
        Vertex {
            position: [-hw, -hh, 0.0],
            uv: [0.0, 1.0],
        },
    ];
    let indices = [0, 3, 2, 0, 2, 1];
    (vertices, indices)
}

/// GPU-resident rectangle geometry, immutable after creation.
#[derive(Debug)]
pub struct Quad {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Quad {
    pub fn new(gpu: &GpuContext, width: f32, height: f32) -> Self {
        let (vertices, indices) = rect_geometry(width, height);

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Plane Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Plane Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_centered() {
        let (vertices, _) = rect_geometry(PLANE_WIDTH, PLANE_HEIGHT);
        let sum = vertices.iter().fold([0.0f32; 3], |acc, v| {
            [
                acc[0] + v.position[0],
                acc[1] + v.position[1],
                acc[2] + v.position[2],
            ]
        });
        assert!(sum.iter().all(|c| c.abs() < 1e-6));
    }

    #[test]
    fn rect_spans_requested_size() {
        let (vertices, _) = rect_geometry(2.0, 1.0);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 0.5);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -0.5);
    }

    #[test]
    fn uvs_cover_the_unit_square() {
        let (vertices, _) = rect_geometry(1.0, 1.0);
        let corners: Vec<[f32; 2]> = vertices.iter().map(|v| v.uv).collect();
        for expected in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
            assert!(corners.contains(&expected));
        }
    }

    #[test]
    fn indices_form_two_ccw_triangles() {
        let (vertices, indices) = rect_geometry(1.0, 1.0);
        assert_eq!(indices.len(), 6);
        for tri in indices.chunks(3) {
            let [a, b, c] = [
                vertices[tri[0] as usize].position,
                vertices[tri[1] as usize].position,
                vertices[tri[2] as usize].position,
            ];
            // Signed area in the XY plane; positive means CCW toward +Z.
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(area > 0.0);
        }
    }
}
