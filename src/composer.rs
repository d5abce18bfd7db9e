//! Two-stage frame composition.
//!
//! Stage 1 renders the gallery through the camera into an offscreen color
//! target; stage 2 reads that target through the ripple pass and writes the
//! surface. The stage order is fixed; this is not a general pass graph.

use crate::camera::Camera;
use crate::gallery::Gallery;
use crate::gpu::GpuContext;
use crate::plane_pass::PlanePass;
use crate::ripple_pass::RipplePass;

/// An off-screen color target the base pass renders into and the ripple
/// pass samples from.
///
/// Created at the surface format so the two stages agree, with both
/// `RENDER_ATTACHMENT` and `TEXTURE_BINDING` usage.
pub struct RenderTarget {
    pub(crate) view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl RenderTarget {
    pub fn new(gpu: &GpuContext, label: &str) -> Self {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: gpu.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            view,
            width: gpu.width(),
            height: gpu.height(),
        }
    }

    /// Recreate the target if the surface size changed.
    pub fn ensure_size(&mut self, gpu: &GpuContext, label: &str) {
        if self.width != gpu.width() || self.height != gpu.height() {
            *self = Self::new(gpu, label);
        }
    }
}

/// Owns the intermediate target and records the fixed two-stage frame.
pub struct FrameComposer {
    base_target: RenderTarget,
}

impl FrameComposer {
    pub fn new(gpu: &GpuContext) -> Self {
        Self {
            base_target: RenderTarget::new(gpu, "Base Pass Target"),
        }
    }

    /// Record and present one frame.
    ///
    /// Uniform contents (plane time, camera pose, ripple time) must already
    /// be decided by the caller; this method only sizes buffers, records the
    /// two passes, submits, and presents. Surface acquisition errors are
    /// returned for the caller's recovery policy.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        plane_pass: &mut PlanePass,
        ripple_pass: &RipplePass,
        gallery: &Gallery,
        camera: &Camera,
        aspect: f32,
        ripple_time: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.base_target.ensure_size(gpu, "Base Pass Target");
        plane_pass.ensure_depth_size(gpu);

        let output = gpu.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Composer Encoder"),
            });

        // Stage 1: gallery into the offscreen target
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Base Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.base_target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &plane_pass.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            plane_pass.render(gpu, &mut render_pass, camera, aspect, gallery);
        }

        // Stage 2: ripple onto the surface
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Ripple Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            ripple_pass.render(gpu, &mut render_pass, ripple_time, &self.base_target.view);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
