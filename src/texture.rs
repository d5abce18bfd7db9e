use std::path::{Path, PathBuf};

use crate::gpu::GpuContext;

/// Failure to read or decode an image file.
#[derive(Debug, thiserror::Error)]
#[error("failed to load texture from {}", path.display())]
pub struct TextureError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

/// A GPU texture that can be bound to shaders.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from raw RGBA data.
    pub fn from_rgba(gpu: &GpuContext, data: &[u8], width: u32, height: u32, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Photographic content: smooth filtering, no tiling.
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label} Sampler")),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Load a texture from an image file.
    pub fn from_file(gpu: &GpuContext, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(
            gpu,
            &img,
            width,
            height,
            &path.display().to_string(),
        ))
    }

    /// Load a texture from embedded bytes.
    pub fn from_bytes(
        gpu: &GpuContext,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)
            .map_err(|source| TextureError {
                path: PathBuf::from(label),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(gpu, &img, width, height, label))
    }
}
